//! Error types for prompt analysis

use thiserror::Error;

/// Main error type for analysis operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The prompt was rejected before any analyzer ran
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Reasons a prompt is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Prompt cannot be empty")]
    Empty,

    #[error("Prompt exceeds maximum length of {max} characters (got {length})")]
    TooLong { length: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
