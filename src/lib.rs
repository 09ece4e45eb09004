//! # zenbmp
//!
//! BMP (Windows bitmap) decoder and encoder.
//!
//! ## Supported Formats
//!
//! - Info headers: `BITMAPINFOHEADER` (40 bytes) and `BITMAPV5HEADER` (124 bytes)
//! - 1, 4 and 8 bits per pixel, indexed, uncompressed
//! - 24 bits per pixel, BGR, uncompressed
//! - 32 bits per pixel, BGRA, uncompressed or bit-fields (fixed BGRA byte order)
//!
//! Indexed images decode to palette indices plus their palette
//! ([`PixelBuffer::Indexed`]); direct-color images decode to RGB8 or RGBA8
//! ([`PixelBuffer::Direct`]). Row 0 of every buffer is the top of the image.
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8, JPEG and PNG compression. These are recognized and rejected
//!   with [`BmpError::UnsupportedFormat`].
//! - OS/2 and v2/v3/v4 info header sizes
//! - Color management. Masks, endpoints, gamma and profile fields of the
//!   v5 header are parsed and written back, never applied.
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{EncodeRequest, PixelBuffer};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding pixels
//! let headers = zenbmp::read_headers(data)?;
//! println!("{}x{} {} bpp", headers.info_header.width(),
//!          headers.info_header.height(), headers.info_header.bit_depth());
//!
//! // Decode
//! let decoded = zenbmp::decode_bmp(data)?;
//! let rgba = decoded.pixels().to_rgba8();
//!
//! // Re-encode at the source depth
//! let encoded = EncodeRequest::new(headers.info_header.bit_depth())
//!     .encode(decoded.pixels())?;
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod buffer;
mod decode;
mod encode;
mod error;
mod limits;
mod pixel;
mod reader;

use alloc::vec::Vec;

// Re-exports
pub use bmp::{
    CORE_HEADER_SIZE, CieXyz, CieXyzTriple, Compression, CoreInfoHeader, EXTENDED_HEADER_SIZE,
    ExtendedInfoHeader, FILE_HEADER_SIZE, FileHeader, InfoHeader, Palette, PaletteEntry,
    SIGNATURE, bytes_per_line, read_color_table, read_file_header, read_info_header, read_raster,
};
pub use buffer::{DirectImage, IndexedImage, PixelBuffer};
pub use decode::{BmpHeaders, DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use error::BmpError;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use reader::ByteReader;

/// Decode a complete BMP file.
pub fn decode_bmp(data: &[u8]) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).decode()
}

/// Decode a complete BMP file, enforcing `limits` before allocating pixels.
pub fn decode_bmp_with_limits(data: &[u8], limits: &Limits) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).with_limits(limits).decode()
}

/// Parse the file header, info header and palette only.
pub fn read_headers(data: &[u8]) -> Result<BmpHeaders, BmpError> {
    DecodeRequest::new(data).read_headers()
}

/// Drain `reader` and decode its contents as a BMP file.
#[cfg(feature = "std")]
pub fn decode_bmp_from_reader<R: std::io::Read>(mut reader: R) -> Result<DecodeOutput, BmpError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_bmp(&data)
}

/// Encode `pixels` at `bit_depth` with a 40-byte info header.
pub fn encode_bmp(pixels: &PixelBuffer, bit_depth: u16) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new(bit_depth).encode(pixels)
}
