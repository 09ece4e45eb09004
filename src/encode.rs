use alloc::vec::Vec;

use crate::bmp::encode::{EncodeSettings, encode_bmp};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;

/// 72 DPI in pixels per meter.
const DEFAULT_RESOLUTION: i32 = 2835;

/// Builder for a BMP encode.
///
/// Indexed buffers can be written at 1, 4 or 8 bits when their palette
/// fits, or expanded through the palette at 24 or 32 bits. Direct-color
/// buffers can only be written at 24 or 32 bits.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    settings: EncodeSettings,
}

impl EncodeRequest {
    /// Encode at `bit_depth` (1, 4, 8, 24 or 32) with a 40-byte header.
    pub fn new(bit_depth: u16) -> Self {
        Self {
            settings: EncodeSettings {
                bit_depth,
                extended_header: false,
                x_pixels_per_meter: DEFAULT_RESOLUTION,
                y_pixels_per_meter: DEFAULT_RESOLUTION,
            },
        }
    }

    /// Write a 124-byte header with an sRGB color space. At 32 bits this
    /// also declares bit-field compression with BGRA masks.
    pub fn with_extended_header(mut self, extended: bool) -> Self {
        self.settings.extended_header = extended;
        self
    }

    /// Resolution in pixels per meter.
    pub fn with_resolution(mut self, x_pixels_per_meter: i32, y_pixels_per_meter: i32) -> Self {
        self.settings.x_pixels_per_meter = x_pixels_per_meter;
        self.settings.y_pixels_per_meter = y_pixels_per_meter;
        self
    }

    pub fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, BmpError> {
        encode_bmp(pixels, &self.settings)
    }
}
