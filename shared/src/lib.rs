//! Shared utilities and common types for the CarHub verification client
//!
//! This crate provides functionality used by both the core and the
//! infrastructure layer:
//! - Configuration types (API endpoints, timings, messages, store backend)
//! - Environment detection and logging configuration
//! - Validation helpers for emails and numeric codes

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, Environment, LogFormat, LoggingConfig, MessagesConfig, StoreBackend,
    StoreConfig, TimingConfig, VerificationConfig,
};
pub use utils::validation;
