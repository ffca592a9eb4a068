//! PNG to raw RGB565 tile conversion.
//!
//! Raw tiles are several times bigger than PNGs but the ESP32 can blit them
//! straight to the display without decoding. The file has no header: a
//! 256x256 tile is exactly 131072 bytes.

use crate::rgb565::rgb_to_rgb565_le;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Edge length of a standard map tile.
pub const EXPECTED_TILE_SIZE: u32 = 256;

/// Options for [`convert_png_to_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOptions {
    /// Keep the PNG after a successful conversion.
    pub keep_source: bool,
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions { keep_source: true }
    }
}

/// A written raw tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Path of the `.raw` file.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl RawOutput {
    /// Whether the source had the standard 256x256 tile size.
    pub fn is_standard_tile(&self) -> bool {
        self.width == EXPECTED_TILE_SIZE && self.height == EXPECTED_TILE_SIZE
    }
}

/// Path of the raw file written for `png_path`.
pub fn raw_path_for(png_path: &Path) -> PathBuf {
    png_path.with_extension("raw")
}

/// Convert one PNG to a headerless little-endian RGB565 dump.
pub fn convert_png_to_raw(png_path: &Path, opts: &RawOptions) -> Result<RawOutput> {
    let rgb = image::open(png_path)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let output = RawOutput {
        path: raw_path_for(png_path),
        width,
        height,
    };
    if !output.is_standard_tile() {
        tracing::warn!(
            path = %png_path.display(),
            width,
            height,
            "tile is not {0}x{0}",
            EXPECTED_TILE_SIZE
        );
    }

    fs::write(&output.path, rgb_to_rgb565_le(&rgb))?;

    if !opts.keep_source {
        fs::remove_file(png_path)?;
    }

    Ok(output)
}
