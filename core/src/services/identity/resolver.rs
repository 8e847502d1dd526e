//! Ordered fallback chain for the email under verification

use std::sync::Arc;

use otp_shared::validation::mask_email;

use crate::repositories::SessionStore;

use super::token_claims::email_claim;

/// Where a resolved identity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Passed in by the flow that opened the verification screen
    Handoff,
    /// Pending-verification marker in the session store
    PendingMarker,
    /// Email of a stored session profile
    SessionProfile,
    /// Email claim of a stored bearer token
    TokenClaim,
}

impl IdentitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentitySource::Handoff => "handoff",
            IdentitySource::PendingMarker => "pending_marker",
            IdentitySource::SessionProfile => "session_profile",
            IdentitySource::TokenClaim => "token_claim",
        }
    }
}

/// A resolved identity together with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub email: String,
    pub source: IdentitySource,
}

/// Resolves the email being verified
pub struct IdentityResolver<S: SessionStore> {
    store: Arc<S>,
}

impl<S: SessionStore> IdentityResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve the identity, returning `""` when every source misses
    pub async fn resolve(&self, handoff: Option<&str>) -> String {
        self.resolve_with_source(handoff)
            .await
            .map(|resolved| resolved.email)
            .unwrap_or_default()
    }

    /// Resolve the identity and report which source produced it
    ///
    /// Sources are tried strictly in order and the first non-empty value
    /// wins. A store or decode failure on one source is a miss, never an
    /// error. When the handoff wins and no pending marker exists yet, the
    /// handoff is persisted as the marker so a reload keeps the identity.
    pub async fn resolve_with_source(&self, handoff: Option<&str>) -> Option<ResolvedIdentity> {
        if let Some(email) = non_empty(handoff) {
            self.remember_handoff(email).await;
            return Some(self.found(email, IdentitySource::Handoff));
        }

        match self.store.get_pending_identity().await {
            Ok(pending) => {
                if let Some(email) = non_empty(pending.as_deref()) {
                    return Some(self.found(email, IdentitySource::PendingMarker));
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to read pending identity marker"),
        }

        match self.store.get_session_profile().await {
            Ok(Some(profile)) => {
                if let Some(email) = profile.email_address() {
                    return Some(self.found(email, IdentitySource::SessionProfile));
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read stored session profile"),
        }

        match self.store.get_session_token().await {
            Ok(Some(token)) => match email_claim(&token) {
                Ok(email) => return Some(self.found(&email, IdentitySource::TokenClaim)),
                Err(e) => tracing::debug!(reason = %e, "Stored token carries no usable email"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read stored session token"),
        }

        tracing::info!(event = "identity_unresolved", "No identity source matched");
        None
    }

    async fn remember_handoff(&self, email: &str) {
        let existing = match self.store.get_pending_identity().await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read pending identity marker");
                return;
            }
        };

        if non_empty(existing.as_deref()).is_some() {
            return;
        }

        if let Err(e) = self.store.set_pending_identity(email).await {
            tracing::warn!(
                email = %mask_email(email),
                error = %e,
                "Failed to persist pending identity marker"
            );
        }
    }

    fn found(&self, email: &str, source: IdentitySource) -> ResolvedIdentity {
        tracing::debug!(
            email = %mask_email(email),
            source = source.as_str(),
            event = "identity_resolved",
            "Resolved identity for verification"
        );
        ResolvedIdentity {
            email: email.to_string(),
            source,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
