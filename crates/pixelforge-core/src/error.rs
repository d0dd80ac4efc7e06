//! Error taxonomy shared by every engine operation.

/// Errors returned by pixelforge operations.
///
/// Every variant is a local validation failure. Inputs are never mutated,
/// so a rejected call leaves nothing to roll back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A named image is not present in the caller's store.
    #[error("image not found: {0}")]
    NotFound(String),

    /// A parameter or input image failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Pixel access outside `[0, width) × [0, height)`.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Width of the image that was accessed.
        width: u32,
        /// Height of the image that was accessed.
        height: u32,
    },
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
