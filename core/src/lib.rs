//! # CarHub OTP Core
//!
//! Client-side email verification for the CarHub marketplace.
//! This crate contains the verification screen state machines (identity
//! resolution, code entry, resend cooldown, alerts, request submission),
//! the session store interface, and the error types they share.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AlertKind, AlertState, CodeSlots, CooldownPhase, CooldownState, ResendOutcome, SessionRecord,
    SubmissionState, UserProfile,
};
pub use errors::*;
pub use repositories::{InMemorySessionStore, SessionStore};
pub use services::{
    AlertNotifier, CodeEntryController, FlowSnapshot, IdentityResolver, IdentitySource, Navigator,
    NoFocus, ResendCooldownTimer, ResolvedIdentity, SlotFocus, VerificationApiTrait,
    VerificationFlow, VerificationSubmitter,
};
