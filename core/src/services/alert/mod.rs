//! Single-slot status alert with auto-dismiss

mod notifier;

#[cfg(test)]
mod tests;

pub use notifier::AlertNotifier;
