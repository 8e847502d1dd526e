//! Tests for code entry


use std::sync::Mutex;

use super::SlotFocus;

/// Records every focus request made by the controller
#[derive(Default)]
pub(crate) struct RecordingFocus {
    pub requests: Mutex<Vec<usize>>,
}

impl RecordingFocus {
    pub fn last(&self) -> Option<usize> {
        self.requests.lock().unwrap().last().copied()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl SlotFocus for RecordingFocus {
    fn focus_slot(&self, index: usize) {
        self.requests.lock().unwrap().push(index);
    }
}
