//! Animation error types

use thiserror::Error;

use crate::driver::AnimationId;

/// Animation-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The id was never issued, or the animation was already released
    #[error("Unknown animation: {0:?}")]
    UnknownAnimation(AnimationId),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
