//! Unit tests for the identity fallback chain

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::errors::StoreError;
use crate::repositories::{
    InMemorySessionStore, SessionStore, PENDING_IDENTITY_KEY, SESSION_PROFILE_KEY,
    SESSION_TOKEN_KEY,
};
use crate::services::identity::{IdentityResolver, IdentitySource};

use super::token_with_payload;

fn resolver(store: &InMemorySessionStore) -> IdentityResolver<InMemorySessionStore> {
    IdentityResolver::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn test_handoff_wins_over_every_other_source() {
    let token = token_with_payload(&json!({"email": "token@b.com"}));
    let store = InMemorySessionStore::with_entries([
        (PENDING_IDENTITY_KEY, "pending@b.com".to_string()),
        (SESSION_PROFILE_KEY, r#"{"email":"profile@b.com"}"#.to_string()),
        (SESSION_TOKEN_KEY, token),
    ]);

    let resolved = resolver(&store)
        .resolve_with_source(Some("handoff@b.com"))
        .await
        .unwrap();
    assert_eq!(resolved.email, "handoff@b.com");
    assert_eq!(resolved.source, IdentitySource::Handoff);

    // Existing marker is left alone
    assert_eq!(
        store.get_pending_identity().await.unwrap(),
        Some("pending@b.com".to_string())
    );
}

#[tokio::test]
async fn test_handoff_is_persisted_when_no_marker_exists() {
    let store = InMemorySessionStore::new();

    let email = resolver(&store).resolve(Some("  new@b.com ")).await;
    assert_eq!(email, "new@b.com");
    assert_eq!(
        store.get_pending_identity().await.unwrap(),
        Some("new@b.com".to_string())
    );
}

#[tokio::test]
async fn test_blank_handoff_falls_through_to_marker() {
    let store = InMemorySessionStore::with_entries([(PENDING_IDENTITY_KEY, "pending@b.com")]);

    let resolved = resolver(&store).resolve_with_source(Some("   ")).await.unwrap();
    assert_eq!(resolved.email, "pending@b.com");
    assert_eq!(resolved.source, IdentitySource::PendingMarker);
}

#[tokio::test]
async fn test_profile_email_used_after_marker() {
    let store = InMemorySessionStore::with_entries([(
        SESSION_PROFILE_KEY,
        r#"{"name":"Jane","email":"profile@b.com"}"#,
    )]);

    let resolved = resolver(&store).resolve_with_source(None).await.unwrap();
    assert_eq!(resolved.email, "profile@b.com");
    assert_eq!(resolved.source, IdentitySource::SessionProfile);
}

#[tokio::test]
async fn test_token_claim_is_last_resort() {
    let token = token_with_payload(&json!({"email": "token@b.com"}));
    let store = InMemorySessionStore::with_entries([
        (SESSION_PROFILE_KEY, r#"{"name":"No Email"}"#.to_string()),
        (SESSION_TOKEN_KEY, token),
    ]);

    let resolved = resolver(&store).resolve_with_source(None).await.unwrap();
    assert_eq!(resolved.email, "token@b.com");
    assert_eq!(resolved.source, IdentitySource::TokenClaim);
}

#[tokio::test]
async fn test_corrupt_profile_is_skipped() {
    let token = token_with_payload(&json!({"email": "token@b.com"}));
    let store = InMemorySessionStore::with_entries([
        (SESSION_PROFILE_KEY, "{broken".to_string()),
        (SESSION_TOKEN_KEY, token),
    ]);

    assert_eq!(resolver(&store).resolve(None).await, "token@b.com");
}

#[tokio::test]
async fn test_all_sources_missing_yields_empty() {
    let store = InMemorySessionStore::new();
    assert_eq!(resolver(&store).resolve(None).await, "");
}

#[tokio::test]
async fn test_undecodable_token_yields_empty() {
    let store = InMemorySessionStore::with_entries([(SESSION_TOKEN_KEY, "not-a-token")]);
    assert_eq!(resolver(&store).resolve(None).await, "");

    let store = InMemorySessionStore::with_entries([(SESSION_TOKEN_KEY, "a.%%%.c")]);
    assert_eq!(resolver(&store).resolve(None).await, "");
}

#[tokio::test]
async fn test_unresolved_does_not_write_marker() {
    let store = InMemorySessionStore::new();
    resolver(&store).resolve(None).await;
    assert!(store.snapshot().await.is_empty());
}

/// Store whose reads always fail
struct UnavailableStore;

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

#[tokio::test]
async fn test_store_failures_are_misses() {
    let resolver = IdentityResolver::new(Arc::new(UnavailableStore));
    assert_eq!(resolver.resolve(None).await, "");
    assert_eq!(resolver.resolve(Some("a@b.com")).await, "a@b.com");
}
