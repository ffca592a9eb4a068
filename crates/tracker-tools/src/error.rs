//! Errors that end a tool run.

use thiserror::Error;
use tracker_convert::ConvertError;
use tracker_tiles::TileError;

/// A fatal error; per-item failures are reported in the summary instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tile planning or download setup failed.
    #[error(transparent)]
    Tiles(#[from] TileError),

    /// Conversion setup failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tool runs.
pub type Result<T> = std::result::Result<T, ToolError>;
