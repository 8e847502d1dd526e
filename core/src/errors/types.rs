//! Error types for the verification flow, code validation, token decoding,
//! the session store and the remote verification API.

use thiserror::Error;

/// Flow-level errors raised before anything reaches the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No email address could be resolved for verification")]
    IdentityUnresolved,

    #[error("A verification request is already in progress")]
    SubmissionInProgress,

    #[error("This email address has already been verified")]
    AlreadyVerified,

    #[error("Please wait {seconds_remaining} seconds before requesting a new code")]
    CooldownActive { seconds_remaining: u32 },

    #[error("The verification screen was closed before the request completed")]
    FlowEnded,
}

/// Local validation errors for code entry and submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("OTP must be {expected} digits (got {actual})")]
    InvalidLength { expected: usize, actual: usize },

    #[error("OTP must contain only numbers")]
    NonNumeric,

    #[error("Code slot {index} is out of range (0-{max})")]
    SlotOutOfRange { index: usize, max: usize },
}

/// Bearer token decoding errors
///
/// These never reach the user; identity resolution treats them as a miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format: expected 3 segments, found {segments}")]
    InvalidTokenFormat { segments: usize },

    #[error("Token payload could not be decoded: {reason}")]
    PayloadDecode { reason: String },

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Persistent session store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Failed to serialize value for '{key}': {reason}")]
    Serialization { key: String, reason: String },
}

/// Failures reported by the remote verification API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered and refused the request
    #[error("Request rejected (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a usable response
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// Server-supplied human-readable message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            ApiError::Transport(_) => None,
        }
    }

    /// Alert text for this failure, falling back to `default` when the server sent none
    pub fn user_message(&self, default: &str) -> String {
        self.server_message().unwrap_or(default).to_string()
    }
}

impl VerificationError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::IdentityUnresolved => "IDENTITY_UNRESOLVED",
            VerificationError::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            VerificationError::AlreadyVerified => "ALREADY_VERIFIED",
            VerificationError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            VerificationError::FlowEnded => "FLOW_ENDED",
        }
    }
}

impl ValidationError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidLength { .. } => "INVALID_LENGTH",
            ValidationError::NonNumeric => "NON_NUMERIC",
            ValidationError::SlotOutOfRange { .. } => "SLOT_OUT_OF_RANGE",
        }
    }
}
