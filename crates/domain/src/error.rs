//! Common error types used across the workspace.
//!
//! Each layer raises its own typed error and converts into [`CatpointError`]
//! via `#[from]`, so callers can match on the failing collaborator.

/// Top-level error for catpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum CatpointError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("status store error")]
    Storage(#[from] StorageError),

    #[error("image classification error")]
    Classification(#[from] ClassificationError),
}

/// A domain invariant was violated while constructing a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("image must have non-zero width and height")]
    EmptyImage,

    #[error("image of {width}x{height} pixels does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },
}

/// The status store could not serve a read or write.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("status store lock poisoned")]
    Poisoned,

    #[error("status store backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The image classifier could not produce a judgment.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("confidence threshold {0} is outside 0..=100")]
    InvalidThreshold(f32),

    #[error("image classifier backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
