//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("code pattern is valid"));

/// Common validation functions
pub mod validators {
    use super::CODE_REGEX;

    /// Check if a string is exactly six ASCII digits
    pub fn is_verification_code(value: &str) -> bool {
        CODE_REGEX.is_match(value)
    }

    /// Check if a string is a single ASCII digit
    pub fn is_single_digit(value: &str) -> bool {
        let mut chars = value.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
    }
}

/// Mask an email address for logging, e.g. `jane@example.com` -> `j***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
