//! Session store trait definition
//!
//! A single logical key-value store shared with the registration and login
//! flows. Backends implement the three raw operations; the typed accessors
//! used by the verification flow are provided on top of them.

use async_trait::async_trait;

use crate::domain::entities::session::UserProfile;
use crate::errors::StoreError;

/// Key holding the opaque bearer token
pub const SESSION_TOKEN_KEY: &str = "sessionToken";

/// Key holding the serialized user profile
pub const SESSION_PROFILE_KEY: &str = "sessionProfile";

/// Key holding the email awaiting verification
pub const PENDING_IDENTITY_KEY: &str = "pendingIdentity";

/// Key-value store for session data
///
/// Writes are last-write-wins per key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Email awaiting verification, if a preceding flow left one
    async fn get_pending_identity(&self) -> Result<Option<String>, StoreError> {
        self.get(PENDING_IDENTITY_KEY).await
    }

    async fn set_pending_identity(&self, email: &str) -> Result<(), StoreError> {
        self.set(PENDING_IDENTITY_KEY, email).await
    }

    async fn clear_pending_identity(&self) -> Result<(), StoreError> {
        self.remove(PENDING_IDENTITY_KEY).await
    }

    async fn get_session_token(&self) -> Result<Option<String>, StoreError> {
        self.get(SESSION_TOKEN_KEY).await
    }

    async fn set_session_token(&self, token: &str) -> Result<(), StoreError> {
        self.set(SESSION_TOKEN_KEY, token).await
    }

    /// Stored profile; a value that is not a valid profile is reported as corrupt
    async fn get_session_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        match self.get(SESSION_PROFILE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: SESSION_PROFILE_KEY.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn set_session_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let raw = serde_json::to_string(profile).map_err(|e| StoreError::Serialization {
            key: SESSION_PROFILE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.set(SESSION_PROFILE_KEY, &raw).await
    }
}
