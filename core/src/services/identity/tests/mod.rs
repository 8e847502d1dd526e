//! Tests for identity resolution

#[cfg(test)]
mod resolver_tests;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Build an unsigned three-segment token around `payload`
pub(crate) fn token_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
