//! Read-only view of the verification screen

use serde::Serialize;

use crate::domain::entities::alert::AlertState;
use crate::domain::entities::code_slots::SLOT_COUNT;
use crate::domain::entities::cooldown::CooldownState;
use crate::domain::entities::submission::SubmissionState;

/// Everything a widget needs to render the screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSnapshot {
    /// Email being verified, empty when unresolved
    pub identity: String,
    /// Slot contents, `""` for an empty slot
    pub slots: [String; SLOT_COUNT],
    pub controls_enabled: bool,
    pub can_submit: bool,
    pub cooldown: CooldownState,
    pub alert: Option<AlertState>,
    pub submission: SubmissionState,
    /// Persistent notice shown instead of the code entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_notice: Option<String>,
}
