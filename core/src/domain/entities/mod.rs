//! Domain entities representing the verification screen's state.

pub mod alert;
pub mod code_slots;
pub mod cooldown;
pub mod session;
pub mod submission;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use alert::{AlertKind, AlertState};
pub use code_slots::{CodeSlots, LAST_SLOT, SLOT_COUNT};
pub use cooldown::{CooldownPhase, CooldownState, DEFAULT_COOLDOWN_SECONDS};
pub use session::{SessionRecord, UserProfile};
pub use submission::{ResendOutcome, SubmissionState};
