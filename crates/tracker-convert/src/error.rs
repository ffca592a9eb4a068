//! Error types for the converters.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting images.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error while walking a directory tree.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Input path does not exist.
    #[error("{} does not exist", .0.display())]
    MissingInput(PathBuf),

    /// JPEG quality out of range.
    #[error("Invalid JPEG quality {0} (must be 1-100)")]
    InvalidQuality(u8),

    /// Worker count of zero.
    #[error("Number of parallel jobs must be at least 1")]
    InvalidJobs,

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Name cannot be used as a C identifier.
    #[error("Invalid C variable name '{0}'")]
    InvalidVariableName(String),
}
