//! Drag error types

use thiserror::Error;

/// Errors raised when validating drag configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    /// Damping ratio outside `(0, 1]`
    #[error("Damping must be in (0, 1], got {0}")]
    InvalidDamping(f32),

    /// Response time not strictly positive
    #[error("Response must be greater than 0, got {0}")]
    InvalidResponse(f32),
}

/// Result type for drag operations
pub type Result<T> = std::result::Result<T, DragError>;
