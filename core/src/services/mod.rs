//! Services driving the email verification screen.

pub mod alert;
pub mod code_entry;
pub mod cooldown;
pub mod flow;
pub mod identity;
pub mod verification;

// Re-export commonly used types
pub use alert::AlertNotifier;
pub use code_entry::{CodeEntryController, NoFocus, SlotFocus};
pub use cooldown::ResendCooldownTimer;
pub use flow::{FlowSnapshot, VerificationFlow};
pub use identity::{IdentityResolver, IdentitySource, ResolvedIdentity};
pub use verification::{
    ApiMessage, Navigator, ResendOtpRequest, SubmitterConfig, VerificationApiTrait,
    VerificationSubmitter, VerifyOtpRequest, VerifyOtpResponse,
};
