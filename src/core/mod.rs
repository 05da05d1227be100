/// Core Module for userseed
///
/// Shared infrastructure for the seeding pipeline: the error type and
/// the crate-wide `Result` alias live here.

pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, SeedError};
