//! Segmented code entry
//!
//! Owns the six-slot passcode buffer and translates widget events (typing,
//! backspace, paste) into buffer mutations and focus requests.

mod controller;
mod focus;

#[cfg(test)]
pub(crate) mod tests;

pub use controller::CodeEntryController;
pub use focus::{NoFocus, SlotFocus};
