use crate::bmp::{
    self, FILE_HEADER_SIZE, FileHeader, InfoHeader, Palette, read_color_table, read_file_header,
    read_info_header,
};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::reader::ByteReader;

/// Everything that precedes the pixel array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeaders {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    /// Present for bit depths of 8 or less.
    pub palette: Option<Palette>,
}

impl BmpHeaders {
    /// Offset of the pixel array implied by the header and palette sizes.
    pub fn computed_data_offset(&self) -> usize {
        FILE_HEADER_SIZE as usize
            + self.info_header.size() as usize
            + self.palette.as_ref().map_or(0, Palette::byte_len)
    }
}

/// Decoded image: the pixel buffer plus the headers it was decoded from.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: PixelBuffer,
    pub width: u32,
    pub height: u32,
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
}

impl DecodeOutput {
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn layout(&self) -> PixelLayout {
        self.pixels.layout()
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Split into the pixel buffer and the info header.
    pub fn into_parts(self) -> (PixelBuffer, InfoHeader) {
        (self.pixels, self.info_header)
    }
}

/// Builder for a BMP decode.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits::default().with_max_pixels(1 << 24);
/// let decoded = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout());
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse headers and palette without touching pixel data.
    pub fn read_headers(&self) -> Result<BmpHeaders, BmpError> {
        read_headers_from(&mut ByteReader::new(self.data))
    }

    pub fn decode(&self) -> Result<DecodeOutput, BmpError> {
        let mut reader = ByteReader::new(self.data);
        let headers = read_headers_from(&mut reader)?;

        let declared = headers.file_header.data_offset as usize;
        let computed = headers.computed_data_offset();
        if declared != computed {
            log::warn!(
                "BMP data offset {declared} differs from computed {computed}; reading sequentially"
            );
        }

        let pixels = bmp::read_raster_with_limits(
            &headers.info_header,
            &mut reader,
            headers.palette.as_ref(),
            self.limits,
        )?;

        Ok(DecodeOutput {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
            file_header: headers.file_header,
            info_header: headers.info_header,
        })
    }
}

fn read_headers_from(reader: &mut ByteReader<'_>) -> Result<BmpHeaders, BmpError> {
    let file_header = read_file_header(reader)?;
    let info_header = read_info_header(reader)?;
    let palette = if info_header.is_indexed() {
        Some(read_color_table(&info_header, reader)?)
    } else {
        None
    };
    Ok(BmpHeaders {
        file_header,
        info_header,
        palette,
    })
}
