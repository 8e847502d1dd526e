//! Tests for the alert notifier
