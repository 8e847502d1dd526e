//! Unverified bearer token payload decoding
//!
//! Only used to recover the email a stored token was issued for. The
//! signature is not checked: the token is never trusted for anything else.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::errors::TokenError;

/// Payload fields that may carry the email, in lookup order
pub const EMAIL_CLAIMS: [&str; 3] = ["email", "userEmail", "user_email"];

/// Decode the payload (middle) segment of a three-segment token
pub fn decode_payload(token: &str) -> Result<Map<String, Value>, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::InvalidTokenFormat {
            segments: segments.len(),
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| TokenError::PayloadDecode {
            reason: e.to_string(),
        })?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(_) => Err(TokenError::PayloadDecode {
            reason: "payload is not a JSON object".to_string(),
        }),
        Err(e) => Err(TokenError::PayloadDecode {
            reason: e.to_string(),
        }),
    }
}

/// Email claim of a token
///
/// Checks [`EMAIL_CLAIMS`] first, then falls back to `sub` when it looks
/// like an address.
pub fn email_claim(token: &str) -> Result<String, TokenError> {
    let claims = decode_payload(token)?;

    let named = EMAIL_CLAIMS
        .iter()
        .find_map(|claim| non_empty_str(claims.get(*claim)));
    let subject = non_empty_str(claims.get("sub")).filter(|sub| sub.contains('@'));

    named
        .or(subject)
        .map(str::to_string)
        .ok_or_else(|| TokenError::MissingClaim {
            claim: "email".to_string(),
        })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
