//! Tests for the session store

#[cfg(test)]
mod memory_tests;
