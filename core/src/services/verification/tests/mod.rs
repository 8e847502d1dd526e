//! Tests for the verification submitter
