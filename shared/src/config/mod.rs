//! Configuration module organised by concern
//!
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Backend endpoints, flow timings and user-facing messages
//! - `store` - Persistent session store backend selection

pub mod environment;
pub mod store;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use store::{StoreBackend, StoreConfig};
pub use verification::{ApiConfig, MessagesConfig, TimingConfig, VerificationConfig};

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Verification flow configuration
    pub verification: VerificationConfig,

    /// Session store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            verification: VerificationConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Logging defaults follow the detected environment; `LOG_LEVEL`,
    /// `LOG_FORMAT` and `LOG_FILE` override them.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            verification: VerificationConfig::from_env(),
            store: StoreConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
