//! Segmented passcode buffer.

use otp_shared::validation::CODE_LENGTH;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Number of slots in the passcode buffer
pub const SLOT_COUNT: usize = CODE_LENGTH;

/// Index of the last slot
pub const LAST_SLOT: usize = SLOT_COUNT - 1;

/// Fixed-length passcode buffer; every slot is empty or a single ASCII digit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSlots {
    slots: [Option<char>; SLOT_COUNT],
}

impl CodeSlots {
    /// Create an all-empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a full buffer from exactly six ASCII digits
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() != SLOT_COUNT || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut slots = [None; SLOT_COUNT];
        for (slot, digit) in slots.iter_mut().zip(code.chars()) {
            *slot = Some(digit);
        }
        Some(Self { slots })
    }

    /// Digit stored at `index`, `None` if empty or out of range
    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Store `digit` at `index`; `None` clears the slot
    pub fn set(&mut self, index: usize, digit: Option<char>) -> Result<(), ValidationError> {
        Self::check_index(index)?;
        if let Some(c) = digit {
            if !c.is_ascii_digit() {
                return Err(ValidationError::NonNumeric);
            }
        }
        self.slots[index] = digit;
        Ok(())
    }

    /// Whether the slot at `index` is empty (out-of-range counts as empty)
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Reset every slot to empty
    pub fn clear(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }

    /// True when every slot holds a digit
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Concatenation of the filled slots, in slot order
    pub fn candidate_code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Slot contents as displayed by the entry widget (`""` for empty)
    pub fn display_values(&self) -> [String; SLOT_COUNT] {
        self.slots.map(|s| s.map(String::from).unwrap_or_default())
    }

    pub(crate) fn check_index(index: usize) -> Result<(), ValidationError> {
        if index > LAST_SLOT {
            return Err(ValidationError::SlotOutOfRange {
                index,
                max: LAST_SLOT,
            });
        }
        Ok(())
    }
}
