use alloc::string::String;

use crate::bmp::Compression;
use crate::pixel::PixelLayout;

/// Errors from BMP decoding and encoding.
///
/// Every error is fatal to the call that produced it; there is no
/// partial or best-effort result.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("invalid BMP signature {found:?}, expected \"BM\"")]
    InvalidSignature { found: [u8; 2] },

    #[error("unrecognized info header size: {0}")]
    UnrecognizedHeaderSize(u32),

    #[error("unrecognized bitmap format: bit depth {bit_depth}, compression {compression}")]
    UnsupportedFormat {
        bit_depth: u16,
        compression: Compression,
    },

    #[error("unexpected end of input at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("palette index {index} at ({x}, {y}) out of range for {palette_len} entries")]
    PaletteIndexOutOfRange {
        index: u8,
        palette_len: usize,
        x: u32,
        y: u32,
    },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("cannot encode {layout:?} pixels at {bit_depth} bits per pixel")]
    UnsupportedEncode { layout: PixelLayout, bit_depth: u16 },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for BmpError {
    fn from(e: std::io::Error) -> Self {
        BmpError::Io(alloc::string::ToString::to_string(&e))
    }
}
