//! Identity resolution for the verification screen
//!
//! Determines which email address is being verified by walking an ordered
//! fallback chain:
//! - the handoff from the preceding registration/login flow
//! - the pending-verification marker in the session store
//! - the email of a stored session profile
//! - the email claim of a stored bearer token

mod resolver;
mod token_claims;

#[cfg(test)]
mod tests;

pub use resolver::{IdentityResolver, IdentitySource, ResolvedIdentity};
pub use token_claims::{decode_payload, email_claim, EMAIL_CLAIMS};
