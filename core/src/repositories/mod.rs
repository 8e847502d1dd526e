//! Persistent store interfaces consumed by the verification flow.

pub mod session;

pub use session::{InMemorySessionStore, SessionStore, PENDING_IDENTITY_KEY, SESSION_PROFILE_KEY, SESSION_TOKEN_KEY};
