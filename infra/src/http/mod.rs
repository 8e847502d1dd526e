//! HTTP client for the CarHub verification backend

pub mod verification_api;


pub use verification_api::{parse_resend_response, parse_verify_response, HttpVerificationApi};
