use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::bmp::{Palette, PaletteEntry};
use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// Decoded pixels, row-major with row 0 at the top of the image.
///
/// Indexed images keep their palette indices so callers can remap the
/// palette without decoding again; direct-color images hold RGB or RGBA
/// samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelBuffer {
    Indexed(IndexedImage),
    Direct(DirectImage),
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        match self {
            Self::Indexed(img) => img.width,
            Self::Direct(img) => img.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Indexed(img) => img.height,
            Self::Direct(img) => img.height,
        }
    }

    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Indexed(_) => PixelLayout::Index8,
            Self::Direct(img) => img.layout,
        }
    }

    /// Raw samples: indices for indexed images, channels otherwise.
    pub fn samples(&self) -> &[u8] {
        match self {
            Self::Indexed(img) => &img.indices,
            Self::Direct(img) => &img.samples,
        }
    }

    pub fn palette(&self) -> Option<&Palette> {
        match self {
            Self::Indexed(img) => Some(&img.palette),
            Self::Direct(_) => None,
        }
    }

    pub fn as_indexed(&self) -> Option<&IndexedImage> {
        match self {
            Self::Indexed(img) => Some(img),
            Self::Direct(_) => None,
        }
    }

    pub fn as_direct(&self) -> Option<&DirectImage> {
        match self {
            Self::Indexed(_) => None,
            Self::Direct(img) => Some(img),
        }
    }

    /// Expand to RGBA8. Palette colors are opaque; RGB sources get alpha 255.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self {
            Self::Indexed(img) => img
                .indices
                .iter()
                .flat_map(|&i| {
                    let e = img.palette.entries()[usize::from(i)];
                    [e.red, e.green, e.blue, 255]
                })
                .collect(),
            Self::Direct(img) if img.layout == PixelLayout::Rgb8 => img
                .samples
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            Self::Direct(img) => img.samples.clone(),
        }
    }

    /// Expand to RGB8, dropping any alpha channel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        match self {
            Self::Indexed(img) => img
                .indices
                .iter()
                .flat_map(|&i| {
                    let e = img.palette.entries()[usize::from(i)];
                    [e.red, e.green, e.blue]
                })
                .collect(),
            Self::Direct(img) if img.layout == PixelLayout::Rgba8 => img
                .samples
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            Self::Direct(img) => img.samples.clone(),
        }
    }
}

fn sample_count(width: u32, height: u32, bpp: usize) -> Result<usize, BmpError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(bpp))
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

// ── Indexed ─────────────────────────────────────────────────────────

/// Palette indices, one byte per pixel, plus the palette they index.
///
/// Every index is guaranteed to be below `palette.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    bits_per_sample: u8,
    indices: Vec<u8>,
    palette: Palette,
}

impl IndexedImage {
    /// Build an indexed image, validating buffer size and index range.
    ///
    /// `bits_per_sample` is the narrowest of 1, 4 or 8 that holds every
    /// index of `palette`.
    pub fn new(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, BmpError> {
        let needed = sample_count(width, height, 1)?;
        if indices.len() != needed {
            return Err(BmpError::BufferTooSmall {
                needed,
                actual: indices.len(),
            });
        }
        if let Some(pos) = indices
            .iter()
            .position(|&i| usize::from(i) >= palette.len())
        {
            let w = width.max(1) as usize;
            return Err(BmpError::PaletteIndexOutOfRange {
                index: indices[pos],
                palette_len: palette.len(),
                x: (pos % w) as u32,
                y: (pos / w) as u32,
            });
        }
        let bits_per_sample = match palette.len() {
            0..=2 => 1,
            3..=16 => 4,
            _ => 8,
        };
        Ok(Self {
            width,
            height,
            bits_per_sample,
            indices,
            palette,
        })
    }

    /// Decoder-side constructor; the raster reader has already range
    /// checked every index.
    pub(crate) fn from_decoded(
        width: u32,
        height: u32,
        bits_per_sample: u8,
        indices: Vec<u8>,
        palette: Palette,
    ) -> Self {
        Self {
            width,
            height,
            bits_per_sample,
            indices,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bit width of each index in the source (1, 4 or 8).
    pub fn bits_per_sample(&self) -> u8 {
        self.bits_per_sample
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.indices.get(start..start + w)
    }

    pub fn index(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|r| r[x as usize])
    }

    /// Palette color at `(x, y)`.
    pub fn color(&self, x: u32, y: u32) -> Option<PaletteEntry> {
        self.index(x, y).and_then(|i| self.palette.get(i))
    }

    pub fn into_parts(self) -> (Vec<u8>, Palette) {
        (self.indices, self.palette)
    }
}

// ── Direct ──────────────────────────────────────────────────────────

/// RGB8 or RGBA8 samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl DirectImage {
    /// Build a direct-color image. `layout` must be `Rgb8` or `Rgba8`.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, BmpError> {
        if layout.is_indexed() {
            return Err(BmpError::LayoutMismatch {
                expected: PixelLayout::Rgb8,
                actual: layout,
            });
        }
        let needed = sample_count(width, height, layout.bytes_per_pixel())?;
        if samples.len() != needed {
            return Err(BmpError::BufferTooSmall {
                needed,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    pub(crate) fn from_decoded(
        width: u32,
        height: u32,
        layout: PixelLayout,
        samples: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn has_alpha(&self) -> bool {
        self.layout == PixelLayout::Rgba8
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * self.layout.bytes_per_pixel();
        let start = y as usize * stride;
        self.samples.get(start..start + stride)
    }

    /// Channels of the pixel at `(x, y)`, 3 or 4 bytes.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.layout.bytes_per_pixel();
        let start = x as usize * bpp;
        self.row(y).map(|r| &r[start..start + bpp])
    }

    /// Reinterpret samples as a typed pixel slice.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.samples.as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}
