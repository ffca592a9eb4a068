//! # tracker-convert
//!
//! Image converters for the LoRa APRS tracker's offline maps and UI assets.
//!
//! - [`convert_png_to_jpeg`] shrinks downloaded PNG tiles for the SD card
//! - [`convert_png_to_raw`] writes headerless little-endian RGB565 dumps the
//!   ESP32 can blit without decoding
//! - [`convert_image_to_lvgl`] emits a C source file with an `lv_img_dsc_t`
//!   descriptor for embedding icons in the firmware
//!
//! Directory-wide conversions combine [`find_files`] with a [`BatchRunner`],
//! which maps a conversion over every file on a fixed-size worker pool and
//! counts failures instead of stopping.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use tracker_convert::{convert_png_to_jpeg, find_files, BatchRunner, JpegOptions};
//!
//! let files = find_files(Path::new("tiles/IDF"), "png")?;
//! let opts = JpegOptions { quality: 80, keep_source: true };
//! let report = BatchRunner::new(4)?.run(&files, |p| convert_png_to_jpeg(p, &opts), None)?;
//! println!("Converted: {}, Errors: {}", report.converted, report.errors);
//! # Ok::<(), tracker_convert::ConvertError>(())
//! ```

mod batch;
mod discover;
mod error;
mod jpeg;
mod lvgl;
mod raw;
mod rgb565;

pub use batch::{
    should_report, BatchFailure, BatchProgress, BatchReport, BatchRunner, ProgressCallback,
    DEFAULT_JOBS,
};
pub use discover::{find_files, total_size};
pub use error::ConvertError;
pub use jpeg::{convert_png_to_jpeg, jpeg_path_for, JpegOptions, DEFAULT_JPEG_QUALITY};
pub use lvgl::{convert_image_to_lvgl, validate_var_name, LvglImage, LvglImageInfo};
pub use raw::{convert_png_to_raw, raw_path_for, RawOptions, RawOutput, EXPECTED_TILE_SIZE};
pub use rgb565::{
    pack_rgb565, rgb_to_rgb565_le, rgba_to_rgb565_alpha, RGB565A_BYTES_PER_PIXEL,
    RGB565_BYTES_PER_PIXEL,
};

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
