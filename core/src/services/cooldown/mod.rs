//! Resend cooldown
//!
//! Locks the resend action for a fixed number of seconds after activation
//! and after every successful resend.

mod timer;

#[cfg(test)]
mod tests;

pub use timer::ResendCooldownTimer;
