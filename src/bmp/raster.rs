//! Pixel array decoding: one unpacker per supported (bit depth,
//! compression) pair.

use alloc::vec;
use alloc::vec::Vec;

use super::header::{Compression, InfoHeader};
use super::palette::Palette;
use super::utils::{bytes_per_line, data_bytes_per_line, unpack_indices};
use crate::buffer::{DirectImage, IndexedImage, PixelBuffer};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::reader::ByteReader;

/// Validated geometry shared by every unpacker.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: u32,
    height: u32,
    top_down: bool,
}

impl Geometry {
    fn from_header(header: &InfoHeader) -> Result<Self, BmpError> {
        let (w, h) = (header.width(), header.height());
        if w <= 0 || h == 0 {
            return Err(BmpError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self {
            width: w as u32,
            height: h.unsigned_abs(),
            top_down: h < 0,
        })
    }

    /// Buffer row that receives the `i`-th scanline of the stream.
    /// Bottom-up files store the last row first.
    fn dest_row(&self, i: u32) -> u32 {
        if self.top_down { i } else { self.height - 1 - i }
    }

    fn buffer_len(&self, layout: PixelLayout) -> Result<usize, BmpError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(layout.bytes_per_pixel()))
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    fn stride(&self, depth: u16) -> Result<usize, BmpError> {
        bytes_per_line(self.width, depth).ok_or(BmpError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        })
    }
}

/// Decode the pixel array that follows the headers and palette.
///
/// Supported pairs are (1, 4, 8, 24 or 32 bits, `BI_RGB`) and
/// (32 bits, `BI_BITFIELDS`). Bit-field images are read as B, G, R, A
/// bytes; the masks in an extended header are not consulted. Indexed
/// depths require `palette`.
pub fn read_raster(
    header: &InfoHeader,
    reader: &mut ByteReader<'_>,
    palette: Option<&Palette>,
) -> Result<PixelBuffer, BmpError> {
    read_raster_with_limits(header, reader, palette, None)
}

pub(crate) fn read_raster_with_limits(
    header: &InfoHeader,
    reader: &mut ByteReader<'_>,
    palette: Option<&Palette>,
    limits: Option<&Limits>,
) -> Result<PixelBuffer, BmpError> {
    let depth = header.bit_depth();
    let compression = header.compression();
    let unsupported = || BmpError::UnsupportedFormat {
        bit_depth: depth,
        compression,
    };

    let layout = match (depth, compression) {
        (1 | 4 | 8, Compression::Rgb) => PixelLayout::Index8,
        (24, Compression::Rgb) => PixelLayout::Rgb8,
        (32, Compression::Rgb | Compression::Bitfields) => PixelLayout::Rgba8,
        _ => return Err(unsupported()),
    };

    let geom = Geometry::from_header(header)?;
    let len = geom.buffer_len(layout)?;
    if let Some(limits) = limits {
        limits.check_dimensions(geom.width, geom.height)?;
        limits.check_memory(len)?;
    }

    // The whole pixel array must be present before anything is allocated.
    let needed = geom
        .stride(depth)?
        .checked_mul(geom.height as usize)
        .ok_or(BmpError::DimensionsTooLarge {
            width: geom.width,
            height: geom.height,
        })?;
    if needed > reader.remaining() {
        return Err(BmpError::UnexpectedEof {
            offset: reader.position(),
            needed: needed - reader.remaining(),
        });
    }

    match layout {
        PixelLayout::Index8 => {
            let palette = palette.ok_or_else(unsupported)?;
            read_indexed(geom, depth, reader, palette, len)
        }
        PixelLayout::Rgb8 => read_bgr24(geom, reader, len),
        PixelLayout::Rgba8 => read_bgra32(geom, reader, len),
    }
}

/// 1-, 4- and 8-bit scanlines: read the padded line into scratch, then
/// unpack indices straight into the destination row.
fn read_indexed(
    geom: Geometry,
    depth: u16,
    reader: &mut ByteReader<'_>,
    palette: &Palette,
    len: usize,
) -> Result<PixelBuffer, BmpError> {
    let width = geom.width as usize;
    let mut line = vec![0u8; geom.stride(depth)?];
    let mut indices: Vec<u8> = vec![0u8; len];

    for i in 0..geom.height {
        reader.read_exact(&mut line)?;
        let y = geom.dest_row(i);
        let row = &mut indices[y as usize * width..][..width];
        unpack_indices(depth, &line, row);

        if let Some(x) = row.iter().position(|&v| usize::from(v) >= palette.len()) {
            return Err(BmpError::PaletteIndexOutOfRange {
                index: row[x],
                palette_len: palette.len(),
                x: x as u32,
                y,
            });
        }
    }

    Ok(PixelBuffer::Indexed(IndexedImage::from_decoded(
        geom.width,
        geom.height,
        depth as u8,
        indices,
        palette.clone(),
    )))
}

/// 24-bit: B, G, R triplets, each row padded to four bytes.
fn read_bgr24(
    geom: Geometry,
    reader: &mut ByteReader<'_>,
    len: usize,
) -> Result<PixelBuffer, BmpError> {
    let row_bytes = geom.width as usize * 3;
    let pad = geom.stride(24)? - row_bytes;
    let mut samples = vec![0u8; len];

    for i in 0..geom.height {
        let y = geom.dest_row(i) as usize;
        let row = &mut samples[y * row_bytes..][..row_bytes];
        reader.read_exact(row)?;
        row.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
        reader.skip(pad)?;
    }

    Ok(PixelBuffer::Direct(DirectImage::from_decoded(
        geom.width,
        geom.height,
        PixelLayout::Rgb8,
        samples,
    )))
}

/// 32-bit: B, G, R, A quads. Rows are already 4-byte aligned.
fn read_bgra32(
    geom: Geometry,
    reader: &mut ByteReader<'_>,
    len: usize,
) -> Result<PixelBuffer, BmpError> {
    let row_bytes = geom.width as usize * 4;
    debug_assert_eq!(data_bytes_per_line(geom.width, 32), Some(row_bytes));
    let mut samples = vec![0u8; len];

    for i in 0..geom.height {
        let y = geom.dest_row(i) as usize;
        let row = &mut samples[y * row_bytes..][..row_bytes];
        reader.read_exact(row)?;
        row.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
    }

    Ok(PixelBuffer::Direct(DirectImage::from_decoded(
        geom.width,
        geom.height,
        PixelLayout::Rgba8,
        samples,
    )))
}
