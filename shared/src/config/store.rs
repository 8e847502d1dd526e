//! Session store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which persistent store backs the session keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map, lost on exit
    Memory,
    /// JSON document on disk
    File,
    /// Redis server
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "file" | "json" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Persistent session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Path of the JSON document used by the file backend
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix applied to every Redis key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            file_path: default_file_path(),
            redis_url: default_redis_url(),
            key_prefix: None,
        }
    }
}

impl StoreConfig {
    /// Create from `SESSION_STORE`, `SESSION_STORE_PATH`, `REDIS_URL` and `SESSION_KEY_PREFIX`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: std::env::var("SESSION_STORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            file_path: std::env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: std::env::var("SESSION_KEY_PREFIX").ok(),
        }
    }

    /// Generate a storage key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from("carhub-session.json")
}

fn default_redis_url() -> String {
    String::from("redis://localhost:6379")
}
