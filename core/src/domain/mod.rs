//! Domain layer containing the entities manipulated by the verification flow.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
