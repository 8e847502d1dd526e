//! Code entry state machine

use std::sync::Arc;

use otp_shared::validation::validators;

use crate::domain::entities::code_slots::{CodeSlots, LAST_SLOT, SLOT_COUNT};
use crate::errors::ValidationError;

use super::focus::{NoFocus, SlotFocus};

/// Owns the passcode buffer and the focus chaining between slots
pub struct CodeEntryController {
    slots: CodeSlots,
    focus: Arc<dyn SlotFocus>,
}

impl CodeEntryController {
    /// Create a controller driving `focus`
    pub fn new(focus: Arc<dyn SlotFocus>) -> Self {
        Self {
            slots: CodeSlots::new(),
            focus,
        }
    }

    /// Create a controller with no widget attached
    pub fn detached() -> Self {
        Self::new(Arc::new(NoFocus))
    }

    /// Current buffer
    pub fn slots(&self) -> &CodeSlots {
        &self.slots
    }

    /// Apply the value typed into slot `index`
    ///
    /// An empty value clears the slot. A single digit is stored and focus
    /// advances to the next slot unless `index` is the last one. Anything
    /// else is rejected and the buffer is left untouched.
    pub fn set_digit(&mut self, index: usize, value: &str) -> Result<(), ValidationError> {
        CodeSlots::check_index(index)?;

        if value.is_empty() {
            return self.slots.set(index, None);
        }

        if !value.chars().all(|c| c.is_ascii_digit()) {
            tracing::trace!(index, "Rejected non-numeric slot input");
            return Err(ValidationError::NonNumeric);
        }
        if !validators::is_single_digit(value) {
            return Err(ValidationError::InvalidLength {
                expected: 1,
                actual: value.chars().count(),
            });
        }

        self.slots.set(index, value.chars().next())?;
        if index < LAST_SLOT {
            self.focus.focus_slot(index + 1);
        }
        Ok(())
    }

    /// Handle backspace pressed in slot `index`
    ///
    /// On an empty slot (other than the first) the previous slot is cleared
    /// and focused; otherwise the slot itself is cleared.
    pub fn handle_backspace(&mut self, index: usize) -> Result<(), ValidationError> {
        CodeSlots::check_index(index)?;

        if self.slots.is_empty_at(index) && index > 0 {
            self.slots.set(index - 1, None)?;
            self.focus.focus_slot(index - 1);
        } else {
            self.slots.set(index, None)?;
        }
        Ok(())
    }

    /// Handle pasted text
    ///
    /// Only exactly six ASCII digits are applied, replacing the whole buffer
    /// and focusing the last slot. Returns whether the paste was applied.
    pub fn handle_paste(&mut self, text: &str) -> bool {
        match CodeSlots::from_code(text) {
            Some(slots) => {
                self.slots = slots;
                self.focus.focus_slot(LAST_SLOT);
                true
            }
            None => {
                tracing::debug!(length = text.chars().count(), "Ignored paste that is not a full code");
                false
            }
        }
    }

    /// Concatenation of the filled slots
    pub fn candidate_code(&self) -> String {
        self.slots.candidate_code()
    }

    /// True when all six slots hold digits
    pub fn is_complete(&self) -> bool {
        self.slots.is_complete()
    }

    /// The candidate code if it is submission-eligible
    pub fn validated_code(&self) -> Result<String, ValidationError> {
        let code = self.candidate_code();
        if code.len() != SLOT_COUNT {
            return Err(ValidationError::InvalidLength {
                expected: SLOT_COUNT,
                actual: code.len(),
            });
        }
        if !validators::is_verification_code(&code) {
            return Err(ValidationError::NonNumeric);
        }
        Ok(code)
    }

    /// Reset every slot to empty
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl Default for CodeEntryController {
    fn default() -> Self {
        Self::detached()
    }
}
