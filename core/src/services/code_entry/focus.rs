//! Focus capability exposed by the entry widget

/// Moves keyboard focus between the widget's slot inputs
pub trait SlotFocus: Send + Sync {
    /// Give focus to the slot at `index`
    fn focus_slot(&self, index: usize);
}

/// Focus sink for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFocus;

impl SlotFocus for NoFocus {
    fn focus_slot(&self, _index: usize) {}
}
