//! PNG to JPEG tile conversion.
//!
//! JPEG tiles are typically 3-5x smaller than the source PNGs with little
//! visible loss on map content, which matters on the tracker's SD card.

use crate::{ConvertError, Result};
use image::codecs::jpeg::JpegEncoder;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Options for [`convert_png_to_jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Encoder quality, 1-100.
    pub quality: u8,
    /// Keep the PNG after a successful conversion.
    pub keep_source: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        JpegOptions {
            quality: DEFAULT_JPEG_QUALITY,
            keep_source: false,
        }
    }
}

impl JpegOptions {
    /// Check that the quality is usable.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConvertError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

/// Path of the JPEG written for `png_path`.
pub fn jpeg_path_for(png_path: &Path) -> PathBuf {
    png_path.with_extension("jpg")
}

/// Re-encode one PNG as a JPEG next to it.
///
/// Transparency is dropped. The PNG is removed only after the JPEG has been
/// written and only when `opts.keep_source` is false.
pub fn convert_png_to_jpeg(png_path: &Path, opts: &JpegOptions) -> Result<PathBuf> {
    opts.validate()?;

    let rgb = image::open(png_path)?.to_rgb8();
    let jpeg_path = jpeg_path_for(png_path);

    let mut writer = BufWriter::new(fs::File::create(&jpeg_path)?);
    JpegEncoder::new_with_quality(&mut writer, opts.quality).encode_image(&rgb)?;
    writer.flush()?;

    if !opts.keep_source {
        fs::remove_file(png_path)?;
    }

    tracing::debug!(src = %png_path.display(), dst = %jpeg_path.display(), "converted to jpeg");
    Ok(jpeg_path)
}
