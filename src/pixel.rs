/// Pixel memory layout of a decoded buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One palette index per byte. The sample range is bounded by the
    /// source bit depth (1, 4 or 8 bits).
    Index8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA (straight alpha, as stored in the file).
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Index8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.bytes_per_pixel()
    }

    /// Whether samples are palette indices rather than color channels.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Index8)
    }
}

/// Typed pixel that can be viewed over a decoded direct-color buffer.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// The buffer layout this pixel type reinterprets.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
