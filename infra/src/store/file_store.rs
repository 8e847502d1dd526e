//! JSON file session store
//!
//! Keeps every key in one JSON object on disk so session state survives a
//! process restart. Writes go to a sibling temp file which is then renamed
//! over the original.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error};

use otp_core::errors::StoreError;
use otp_core::repositories::SessionStore;

use crate::InfrastructureError;

type Entries = BTreeMap<String, String>;

/// Session store persisted as a JSON file
pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Use the file at `path`; it is created on first write
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, InfrastructureError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn persist(&self, entries: &Entries) -> Result<(), InfrastructureError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn update<F>(&self, key: &str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entries) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await.map_err(|e| self.store_error(key, e))?;
        if !apply(&mut entries) {
            return Ok(());
        }

        self.persist(&entries).await.map_err(|e| {
            error!(path = %self.path.display(), key, error = %e, "Failed to write session file");
            self.store_error(key, e)
        })?;
        debug!(key, "Session file updated");
        Ok(())
    }

    fn store_error(&self, key: &str, err: InfrastructureError) -> StoreError {
        match err {
            InfrastructureError::Serialization(e) => StoreError::Corrupt {
                key: key.to_string(),
                reason: format!("{}: {}", self.path.display(), e),
            },
            other => other.into(),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.load().await.map_err(|e| self.store_error(key, e))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(key, |entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(key, |entries| entries.remove(key).is_some()).await
    }
}
