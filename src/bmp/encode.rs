//! BMP encoder: 1/4/8-bit indexed, 24-bit BGR and 32-bit BGRA.

use alloc::vec;
use alloc::vec::Vec;

use super::header::{
    CORE_HEADER_SIZE, Compression, CoreInfoHeader, EXTENDED_HEADER_SIZE, ExtendedInfoHeader,
    FILE_HEADER_SIZE, FileHeader, InfoHeader, SIGNATURE,
};
use super::palette::Palette;
use super::utils::{bytes_per_line, data_bytes_per_line, pack_indices};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// Encoder settings resolved by [`crate::EncodeRequest`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct EncodeSettings {
    pub bit_depth: u16,
    pub extended_header: bool,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
}

pub(crate) fn encode_bmp(
    pixels: &PixelBuffer,
    settings: &EncodeSettings,
) -> Result<Vec<u8>, BmpError> {
    let depth = settings.bit_depth;
    let layout = pixels.layout();
    let (width, height) = (pixels.width(), pixels.height());

    let palette = match (depth, pixels) {
        (1 | 4 | 8, PixelBuffer::Indexed(img)) if img.palette().len() <= 1 << depth => {
            Some(img.palette())
        }
        (24 | 32, _) => None,
        _ => {
            return Err(BmpError::UnsupportedEncode {
                layout,
                bit_depth: depth,
            });
        }
    };

    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: width as i32,
            height: height as i32,
        });
    }
    let too_large = || BmpError::DimensionsTooLarge { width, height };
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(too_large());
    };

    let stride = bytes_per_line(width, depth).ok_or_else(too_large)?;
    let data_bytes = data_bytes_per_line(width, depth).ok_or_else(too_large)?;
    let palette_bytes = palette.map_or(0, Palette::byte_len);
    let header_size = if settings.extended_header {
        EXTENDED_HEADER_SIZE
    } else {
        CORE_HEADER_SIZE
    };
    let data_offset = FILE_HEADER_SIZE as usize + header_size as usize + palette_bytes;
    let pixel_data_size = stride.checked_mul(height as usize).ok_or_else(too_large)?;
    let file_size = pixel_data_size.checked_add(data_offset).ok_or_else(too_large)?;
    let (Ok(file_size_u32), Ok(image_size)) =
        (u32::try_from(file_size), u32::try_from(pixel_data_size))
    else {
        return Err(too_large());
    };

    let bitfields = settings.extended_header && depth == 32;
    let core = CoreInfoHeader {
        width: w,
        // Positive height: rows are written bottom-up.
        height: h,
        planes: 1,
        bit_count: depth,
        compression: if bitfields {
            Compression::Bitfields
        } else {
            Compression::Rgb
        },
        image_size,
        x_pixels_per_meter: settings.x_pixels_per_meter,
        y_pixels_per_meter: settings.y_pixels_per_meter,
        colors_used: palette.map_or(0, |p| p.len() as u32),
        colors_important: 0,
    };
    let info = if settings.extended_header {
        let mut ext = ExtendedInfoHeader::srgb(core);
        if !bitfields {
            ext.red_mask = 0;
            ext.green_mask = 0;
            ext.blue_mask = 0;
            ext.alpha_mask = 0;
        }
        InfoHeader::Extended(ext)
    } else {
        InfoHeader::Core(core)
    };
    let file_header = FileHeader {
        signature: SIGNATURE,
        file_size: file_size_u32,
        reserved: 0,
        data_offset: data_offset as u32,
    };

    let mut out = Vec::with_capacity(file_size);
    file_header.write_to(&mut out);
    info.write_to(&mut out);
    if let Some(palette) = palette {
        palette.write_to(&mut out);
    }

    let mut line = vec![0u8; stride];
    for y in (0..height).rev() {
        let data = &mut line[..data_bytes];
        match depth {
            1 | 4 | 8 => {
                if let PixelBuffer::Indexed(img) = pixels {
                    pack_indices(depth, img.row(y).unwrap_or_default(), data);
                }
            }
            24 => write_bgr_row(pixels, y, data),
            _ => write_bgra_row(pixels, y, data),
        }
        out.extend_from_slice(&line);
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

fn write_bgr_row(pixels: &PixelBuffer, y: u32, out: &mut [u8]) {
    match pixels {
        PixelBuffer::Indexed(img) => {
            let palette = img.palette().entries();
            for (o, &i) in out.chunks_exact_mut(3).zip(img.row(y).unwrap_or_default()) {
                let e = palette[usize::from(i)];
                o.copy_from_slice(&[e.blue, e.green, e.red]);
            }
        }
        PixelBuffer::Direct(img) => {
            let bpp = img.layout().bytes_per_pixel();
            let row = img.row(y).unwrap_or_default();
            for (o, px) in out.chunks_exact_mut(3).zip(row.chunks_exact(bpp)) {
                o.copy_from_slice(&[px[2], px[1], px[0]]);
            }
        }
    }
}

fn write_bgra_row(pixels: &PixelBuffer, y: u32, out: &mut [u8]) {
    match pixels {
        PixelBuffer::Indexed(img) => {
            let palette = img.palette().entries();
            for (o, &i) in out.chunks_exact_mut(4).zip(img.row(y).unwrap_or_default()) {
                let e = palette[usize::from(i)];
                o.copy_from_slice(&[e.blue, e.green, e.red, 255]);
            }
        }
        PixelBuffer::Direct(img) => {
            let row = img.row(y).unwrap_or_default();
            if img.layout() == PixelLayout::Rgba8 {
                for (o, px) in out.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
                    o.copy_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            } else {
                for (o, px) in out.chunks_exact_mut(4).zip(row.chunks_exact(3)) {
                    o.copy_from_slice(&[px[2], px[1], px[0], 255]);
                }
            }
        }
    }
}
