//! # Infrastructure Layer
//!
//! Concrete implementations behind the traits of `otp_core`:
//! - **HTTP**: the CarHub verification backend via reqwest
//! - **Store**: session store backends (JSON file, Redis) and a factory
//!   choosing one from configuration
//! - **Telemetry**: tracing subscriber setup from `LoggingConfig`
//! - **Bootstrap**: `.env` loading and flow construction
//!
//! ## Features
//!
//! - `redis-store`: Enable the Redis session store (default)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Bootstrap module - configuration loading and flow wiring
pub mod bootstrap;

/// HTTP module - verification backend client
pub mod http;

/// Store module - session store backends
pub mod store;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

pub use bootstrap::{build_flow, load_config, ConfiguredFlow};
pub use http::HttpVerificationApi;
pub use store::{ConfiguredSessionStore, FileSessionStore};
#[cfg(feature = "redis-store")]
pub use store::RedisSessionStore;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis session store error
    #[cfg(feature = "redis-store")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Serialization(e) => StoreError::Corrupt {
                key: String::from("*"),
                reason: e.to_string(),
            },
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}
