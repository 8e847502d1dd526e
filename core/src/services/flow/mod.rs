//! Verification screen façade
//!
//! Wires identity resolution, code entry, the resend cooldown, alerts and
//! the submitter into one activation-scoped flow.

mod service;
mod snapshot;

#[cfg(test)]
mod tests;

pub use service::VerificationFlow;
pub use snapshot::FlowSnapshot;
