//! Error types for the tiles crate.

use thiserror::Error;

/// Errors that can occur while planning or downloading map tiles.
#[derive(Debug, Error)]
pub enum TileError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error when fetching tiles.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The tile server answered, but not with a tile.
    #[error("Failed to download tile z={z} x={x} y={y}: {reason}")]
    TileDownloadFailed {
        /// Zoom level.
        z: u8,
        /// X tile coordinate.
        x: u32,
        /// Y tile coordinate.
        y: u32,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid zoom level.
    #[error("Invalid zoom level {0} (must be 0-19)")]
    InvalidZoomLevel(u8),

    /// Bounding box text could not be parsed or is not a valid rectangle.
    #[error("Invalid bounding box '{input}': {reason}")]
    InvalidBoundingBox {
        /// The text that was parsed.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Zoom list text could not be parsed.
    #[error("Invalid zoom list '{0}': zoom must be comma-separated integers")]
    InvalidZoomList(String),

    /// Region code is not in the catalog.
    #[error("Unknown region '{0}' (use --list to see predefined regions)")]
    UnknownRegion(String),

    /// Region presets file could not be parsed.
    #[error("Invalid region presets: {0}")]
    RegionPresets(#[from] serde_yaml::Error),
}
