//! Configuration error types

use thiserror::Error;

/// Errors raised while building or re-laying out a sheet.
///
/// These only surface from the control context. Gesture and scroll callbacks
/// never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No snap points were declared
    #[error("snap point set is empty")]
    EmptySnapPoints,

    /// A snap point resolved to a negative position
    #[error("snap point {index} resolves to negative position {position}")]
    NegativeSnapPoint { index: usize, position: f32 },

    /// Snap points are not strictly ascending or strictly descending
    #[error("snap points must be strictly ordered, found {previous} followed by {next}")]
    UnorderedSnapPoints { previous: f32, next: f32 },

    /// A snap point lies below the container's bottom edge
    #[error("snap point position {position} exceeds container height {container_height}")]
    SnapPointBeyondContainer { position: f32, container_height: f32 },

    /// Container height must be finite and positive
    #[error("invalid container height: {0}")]
    InvalidContainerHeight(f32),

    /// Over-drag resistance factor must be finite and non-negative
    #[error("invalid over-drag resistance factor: {0}")]
    InvalidResistanceFactor(f32),

    /// Pixel density must be finite and positive
    #[error("invalid pixel density: {0}")]
    InvalidPixelDensity(f32),

    /// Scroll buffer must be finite and non-negative
    #[error("invalid scroll buffer: {0}")]
    InvalidScrollBuffer(f32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
