//! Unit tests for the in-memory session store and the typed accessors

use crate::domain::entities::session::{SessionRecord, UserProfile};
use crate::errors::StoreError;
use crate::repositories::session::{
    InMemorySessionStore, SessionStore, PENDING_IDENTITY_KEY, SESSION_PROFILE_KEY,
    SESSION_TOKEN_KEY,
};

#[tokio::test]
async fn test_raw_roundtrip_and_remove() {
    let store = InMemorySessionStore::new();
    assert_eq!(store.get("k").await.unwrap(), None);

    store.set("k", "v1").await.unwrap();
    store.set("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));

    store.remove("k").await.unwrap();
    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_pending_identity_accessors() {
    let store = InMemorySessionStore::new();
    store.set_pending_identity("a@b.com").await.unwrap();
    assert_eq!(
        store.get(PENDING_IDENTITY_KEY).await.unwrap(),
        Some("a@b.com".to_string())
    );
    assert_eq!(
        store.get_pending_identity().await.unwrap(),
        Some("a@b.com".to_string())
    );

    store.clear_pending_identity().await.unwrap();
    assert_eq!(store.get_pending_identity().await.unwrap(), None);
}

#[tokio::test]
async fn test_session_accessors_write_token_and_profile() {
    let store = InMemorySessionStore::new();
    let record = SessionRecord::new("abc", UserProfile::with_email("a@b.com"));

    store.set_session_token(&record.token).await.unwrap();
    store.set_session_profile(&record.profile).await.unwrap();

    let entries = store.snapshot().await;
    assert_eq!(entries[SESSION_TOKEN_KEY], "abc");
    assert_eq!(entries[SESSION_PROFILE_KEY], r#"{"email":"a@b.com"}"#);
    assert_eq!(
        store.get_session_profile().await.unwrap(),
        Some(UserProfile::with_email("a@b.com"))
    );
}

#[tokio::test]
async fn test_corrupt_profile_is_reported() {
    let store = InMemorySessionStore::with_entries([(SESSION_PROFILE_KEY, "{not json")]);
    match store.get_session_profile().await {
        Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, SESSION_PROFILE_KEY),
        other => panic!("Expected corrupt profile error, got {:?}", other),
    }
}
