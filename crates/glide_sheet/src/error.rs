//! Sheet error types

use glide_core::ConfigError;
use thiserror::Error;

/// Errors raised by the control context
#[derive(Error, Debug)]
pub enum SheetError {
    /// Snap layout or scalar configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to read a configuration file
    #[error("Failed to read sheet config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text is not valid TOML for a sheet
    #[error("Failed to parse sheet config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be written back out
    #[error("Failed to serialize sheet config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Snap point is given as a percentage string that does not parse
    #[error("Invalid snap point {0:?}, expected pixels or a percentage like \"50%\"")]
    InvalidSnapPoint(String),

    /// Command referenced a snap index that does not exist
    #[error("Snap index {index} out of range for {len} snap points")]
    InvalidSnapIndex { index: i32, len: usize },
}

/// Result type for sheet operations
pub type Result<T> = std::result::Result<T, SheetError>;
