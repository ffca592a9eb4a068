//! Image to LVGL C asset conversion.
//!
//! Produces a C source file with the pixel data as a `uint8_t` array and an
//! `lv_img_dsc_t` descriptor in `LV_IMG_CF_TRUE_COLOR_ALPHA` format (LVGL v8,
//! 16-bit colour depth): every pixel is the RGB565 value in little-endian
//! order followed by an alpha byte.

use crate::rgb565::rgba_to_rgb565_alpha;
use crate::{ConvertError, Result};
use image::RgbaImage;
use std::fs;
use std::path::Path;

/// Array bytes per line in the generated source.
const BYTES_PER_LINE: usize = 12;

/// Pixel data ready to be emitted as an LVGL image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LvglImage {
    var_name: String,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Summary of a generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LvglImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Length of the pixel array in bytes.
    pub data_size: usize,
}

/// Check that `name` can be used as a C identifier.
pub fn validate_var_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConvertError::InvalidVariableName(name.to_string()));
    }
    Ok(())
}

impl LvglImage {
    /// Build an image from RGBA pixels.
    pub fn from_rgba(var_name: &str, img: &RgbaImage) -> Result<Self> {
        validate_var_name(var_name)?;
        Ok(Self {
            var_name: var_name.to_string(),
            width: img.width(),
            height: img.height(),
            data: rgba_to_rgb565_alpha(img),
        })
    }

    /// The C variable name of the descriptor.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Pixel bytes, three per pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Dimensions and data size.
    pub fn info(&self) -> LvglImageInfo {
        LvglImageInfo {
            width: self.width,
            height: self.height,
            data_size: self.data.len(),
        }
    }

    /// Render the C source file.
    pub fn render_c_source(&self) -> String {
        let var = &self.var_name;
        let attr = format!("LV_ATTRIBUTE_IMG_{}", var.to_ascii_uppercase());

        // "0x00, " is six characters per byte.
        let mut src = String::with_capacity(self.data.len() * 6 + 1024);
        src.push_str(&format!(
            "// Auto-generated LVGL image: {var}\n\
             // Size: {w}x{h}\n\
             \n\
             #include \"lvgl.h\"\n\
             \n\
             #ifndef LV_ATTRIBUTE_MEM_ALIGN\n\
             #define LV_ATTRIBUTE_MEM_ALIGN\n\
             #endif\n\
             \n\
             #ifndef {attr}\n\
             #define {attr}\n\
             #endif\n\
             \n\
             const LV_ATTRIBUTE_MEM_ALIGN {attr} uint8_t {var}_map[] = {{\n",
            w = self.width,
            h = self.height,
        ));

        for (i, byte) in self.data.iter().enumerate() {
            if i % BYTES_PER_LINE == 0 {
                src.push_str("\n    ");
            }
            src.push_str(&format!("0x{byte:02x}, "));
        }

        src.push_str(&format!(
            "\n}};\n\
             \n\
             const lv_img_dsc_t {var} = {{\n\
             \x20   .header.cf = LV_IMG_CF_TRUE_COLOR_ALPHA,\n\
             \x20   .header.always_zero = 0,\n\
             \x20   .header.reserved = 0,\n\
             \x20   .header.w = {w},\n\
             \x20   .header.h = {h},\n\
             \x20   .data_size = {size},\n\
             \x20   .data = {var}_map,\n\
             }};\n",
            w = self.width,
            h = self.height,
            size = self.data.len(),
        ));
        src
    }
}

/// Convert any supported image file into an LVGL C source file.
pub fn convert_image_to_lvgl(input: &Path, output: &Path, var_name: &str) -> Result<LvglImageInfo> {
    validate_var_name(var_name)?;

    let rgba = image::open(input)?.to_rgba8();
    let lvgl = LvglImage::from_rgba(var_name, &rgba)?;
    fs::write(output, lvgl.render_c_source())?;

    let info = lvgl.info();
    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        bytes = info.data_size,
        "wrote lvgl image"
    );
    Ok(info)
}
