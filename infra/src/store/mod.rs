//! Session store backends
//!
//! The in-memory store lives in `otp_core`; this module adds a JSON file
//! store and a Redis store, plus [`ConfiguredSessionStore`] which picks one
//! of the three from `StoreConfig`.

pub mod file_store;
#[cfg(feature = "redis-store")]
pub mod redis_store;


use async_trait::async_trait;
use otp_core::errors::StoreError;
use otp_core::repositories::{InMemorySessionStore, SessionStore};
use otp_shared::{StoreBackend, StoreConfig};

use crate::InfrastructureError;

pub use file_store::FileSessionStore;
#[cfg(feature = "redis-store")]
pub use redis_store::RedisSessionStore;

/// Session store selected at startup
pub enum ConfiguredSessionStore {
    Memory(InMemorySessionStore),
    File(FileSessionStore),
    #[cfg(feature = "redis-store")]
    Redis(RedisSessionStore),
}

impl ConfiguredSessionStore {
    /// Open the backend named by `config`
    pub async fn connect(config: &StoreConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(backend = ?config.backend, "Opening session store");

        match config.backend {
            StoreBackend::Memory => Ok(Self::Memory(InMemorySessionStore::new())),
            StoreBackend::File => Ok(Self::File(FileSessionStore::new(&config.file_path))),
            #[cfg(feature = "redis-store")]
            StoreBackend::Redis => Ok(Self::Redis(RedisSessionStore::connect(config).await?)),
            #[cfg(not(feature = "redis-store"))]
            StoreBackend::Redis => Err(InfrastructureError::Config(
                "Redis session store requested but the `redis-store` feature is disabled"
                    .to_string(),
            )),
        }
    }

    fn inner(&self) -> &dyn SessionStore {
        match self {
            Self::Memory(store) => store,
            Self::File(store) => store,
            #[cfg(feature = "redis-store")]
            Self::Redis(store) => store,
        }
    }
}

#[async_trait]
impl SessionStore for ConfiguredSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner().set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner().remove(key).await
    }
}
