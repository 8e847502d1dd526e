//! Tests for the verification flow

#[cfg(test)]
mod flow_tests;
