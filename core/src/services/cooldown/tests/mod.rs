//! Tests for the resend cooldown

#[cfg(test)]
mod timer_tests;
