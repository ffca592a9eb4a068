//! RGB565 pixel packing.
//!
//! The tracker's display driver takes 16-bit `RRRRRGGG GGGBBBBB` pixels in
//! little-endian byte order. Channels are truncated, not rounded.

use image::{RgbImage, RgbaImage};

/// Bytes per pixel of a raw RGB565 dump.
pub const RGB565_BYTES_PER_PIXEL: usize = 2;

/// Bytes per pixel of RGB565 followed by an alpha byte.
pub const RGB565A_BYTES_PER_PIXEL: usize = 3;

/// Pack an 8-bit-per-channel colour into RGB565.
#[inline]
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Row-major RGB565 little-endian pixels, `width * height * 2` bytes.
pub fn rgb_to_rgb565_le(img: &RgbImage) -> Vec<u8> {
    let pixels = img.width() as usize * img.height() as usize;
    let mut out = Vec::with_capacity(pixels * RGB565_BYTES_PER_PIXEL);
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        out.extend_from_slice(&pack_rgb565(r, g, b).to_le_bytes());
    }
    out
}

/// Row-major RGB565 + alpha pixels: low byte, high byte, alpha.
pub fn rgba_to_rgb565_alpha(img: &RgbaImage) -> Vec<u8> {
    let pixels = img.width() as usize * img.height() as usize;
    let mut out = Vec::with_capacity(pixels * RGB565A_BYTES_PER_PIXEL);
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let [lo, hi] = pack_rgb565(r, g, b).to_le_bytes();
        out.extend_from_slice(&[lo, hi, a]);
    }
    out
}
