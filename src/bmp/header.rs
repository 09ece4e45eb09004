//! BMP file header and the two supported info header versions.
//!
//! Only `BITMAPINFOHEADER` (40 bytes, "v3") and `BITMAPV5HEADER`
//! (124 bytes, "v5") are accepted. The v5 header is a strict superset:
//! it carries every v3 field first, then 84 bytes of channel masks and
//! color management data that are parsed and written back verbatim but
//! never interpreted by the decoder.

use alloc::vec::Vec;
use core::fmt;

use crate::error::BmpError;
use crate::reader::ByteReader;

/// `"BM"`, the only signature accepted.
pub const SIGNATURE: [u8; 2] = *b"BM";
/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: u32 = 14;
/// `BITMAPINFOHEADER` size.
pub const CORE_HEADER_SIZE: u32 = 40;
/// `BITMAPV5HEADER` size.
pub const EXTENDED_HEADER_SIZE: u32 = 124;

/// `LCS_sRGB` color space tag ("sRGB" as a little-endian u32).
pub const LCS_SRGB: u32 = 0x7352_4742;
/// `LCS_GM_IMAGES` rendering intent.
pub const LCS_GM_IMAGES: u32 = 4;

// ── Compression ─────────────────────────────────────────────────────

/// Compression mode declared in the info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    /// `BI_RGB`, uncompressed.
    Rgb,
    /// `BI_RLE8`. Recognized, not decoded.
    Rle8,
    /// `BI_RLE4`. Recognized, not decoded.
    Rle4,
    /// `BI_BITFIELDS`.
    Bitfields,
    /// `BI_JPEG`. Recognized, not decoded.
    Jpeg,
    /// `BI_PNG`. Recognized, not decoded.
    Png,
    /// Any other value, preserved so the header can be written back.
    Unknown(u32),
}

impl Compression {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            4 => Self::Jpeg,
            5 => Self::Png,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::Jpeg => 4,
            Self::Png => 5,
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => f.write_str("BI_RGB"),
            Self::Rle8 => f.write_str("BI_RLE8"),
            Self::Rle4 => f.write_str("BI_RLE4"),
            Self::Bitfields => f.write_str("BI_BITFIELDS"),
            Self::Jpeg => f.write_str("BI_JPEG"),
            Self::Png => f.write_str("BI_PNG"),
            Self::Unknown(v) => write!(f, "unknown ({v})"),
        }
    }
}

// ── File header ─────────────────────────────────────────────────────

/// The 14-byte `BITMAPFILEHEADER`.
///
/// `file_size` and `data_offset` are informational. Decoding never seeks
/// to `data_offset`; pixel data is located by sequential consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());
    }
}

/// Read the file header. The signature is checked before any numeric
/// field is read.
pub fn read_file_header(reader: &mut ByteReader<'_>) -> Result<FileHeader, BmpError> {
    let signature = reader.read_array::<2>()?;
    if signature != SIGNATURE {
        return Err(BmpError::InvalidSignature { found: signature });
    }
    Ok(FileHeader {
        signature,
        file_size: reader.read_u32_le()?,
        reserved: reader.read_u32_le()?,
        data_offset: reader.read_u32_le()?,
    })
}

// ── Info headers ────────────────────────────────────────────────────

/// Fields of `BITMAPINFOHEADER`, shared by both header versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreInfoHeader {
    pub width: i32,
    /// Positive for bottom-up rows (the default), negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: Compression,
    /// Compressed data size, 0 is allowed for uncompressed images.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl CoreInfoHeader {
    fn read_body(reader: &mut ByteReader<'_>) -> Result<Self, BmpError> {
        Ok(Self {
            width: reader.read_i32_le()?,
            height: reader.read_i32_le()?,
            planes: reader.read_u16_le()?,
            bit_count: reader.read_u16_le()?,
            compression: Compression::from_u32(reader.read_u32_le()?),
            image_size: reader.read_u32_le()?,
            x_pixels_per_meter: reader.read_i32_le()?,
            y_pixels_per_meter: reader.read_i32_le()?,
            colors_used: reader.read_u32_le()?,
            colors_important: reader.read_u32_le()?,
        })
    }

    fn write_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_u32().to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// A CIE XYZ endpoint in 2.30 fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CieXyz {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Red, green and blue endpoints of the color space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CieXyzTriple {
    pub red: CieXyz,
    pub green: CieXyz,
    pub blue: CieXyz,
}

/// `BITMAPV5HEADER`: the core fields plus masks and color management.
///
/// The masks are informational. 32-bit bit-field images are always
/// decoded as B, G, R, A bytes regardless of what the masks declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedInfoHeader {
    pub core: CoreInfoHeader,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: u32,
    pub endpoints: CieXyzTriple,
    pub gamma_red: u32,
    pub gamma_green: u32,
    pub gamma_blue: u32,
    pub intent: u32,
    /// Offset of the embedded ICC profile from the start of this header.
    pub profile_data: u32,
    pub profile_size: u32,
    pub reserved: u32,
}

impl ExtendedInfoHeader {
    /// An extended header for `core` with the standard BGRA masks and an
    /// sRGB color space, as written by the encoder.
    pub fn srgb(core: CoreInfoHeader) -> Self {
        Self {
            core,
            red_mask: 0x00FF_0000,
            green_mask: 0x0000_FF00,
            blue_mask: 0x0000_00FF,
            alpha_mask: 0xFF00_0000,
            color_space_type: LCS_SRGB,
            endpoints: CieXyzTriple::default(),
            gamma_red: 0,
            gamma_green: 0,
            gamma_blue: 0,
            intent: LCS_GM_IMAGES,
            profile_data: 0,
            profile_size: 0,
            reserved: 0,
        }
    }

    fn read_body(reader: &mut ByteReader<'_>) -> Result<Self, BmpError> {
        let core = CoreInfoHeader::read_body(reader)?;
        let red_mask = reader.read_u32_le()?;
        let green_mask = reader.read_u32_le()?;
        let blue_mask = reader.read_u32_le()?;
        let alpha_mask = reader.read_u32_le()?;
        let color_space_type = reader.read_u32_le()?;
        let mut xyz = || -> Result<CieXyz, BmpError> {
            Ok(CieXyz {
                x: reader.read_i32_le()?,
                y: reader.read_i32_le()?,
                z: reader.read_i32_le()?,
            })
        };
        let endpoints = CieXyzTriple {
            red: xyz()?,
            green: xyz()?,
            blue: xyz()?,
        };
        Ok(Self {
            core,
            red_mask,
            green_mask,
            blue_mask,
            alpha_mask,
            color_space_type,
            endpoints,
            gamma_red: reader.read_u32_le()?,
            gamma_green: reader.read_u32_le()?,
            gamma_blue: reader.read_u32_le()?,
            intent: reader.read_u32_le()?,
            profile_data: reader.read_u32_le()?,
            profile_size: reader.read_u32_le()?,
            reserved: reader.read_u32_le()?,
        })
    }

    fn write_body(&self, out: &mut Vec<u8>) {
        self.core.write_body(out);
        for v in [
            self.red_mask,
            self.green_mask,
            self.blue_mask,
            self.alpha_mask,
            self.color_space_type,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for xyz in [self.endpoints.red, self.endpoints.green, self.endpoints.blue] {
            out.extend_from_slice(&xyz.x.to_le_bytes());
            out.extend_from_slice(&xyz.y.to_le_bytes());
            out.extend_from_slice(&xyz.z.to_le_bytes());
        }
        for v in [
            self.gamma_red,
            self.gamma_green,
            self.gamma_blue,
            self.intent,
            self.profile_data,
            self.profile_size,
            self.reserved,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// The info header, in whichever version the file declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoHeader {
    Core(CoreInfoHeader),
    Extended(ExtendedInfoHeader),
}

impl InfoHeader {
    /// The core fields, present in both versions.
    pub fn core(&self) -> &CoreInfoHeader {
        match self {
            Self::Core(core) => core,
            Self::Extended(ext) => &ext.core,
        }
    }

    pub fn extended(&self) -> Option<&ExtendedInfoHeader> {
        match self {
            Self::Core(_) => None,
            Self::Extended(ext) => Some(ext),
        }
    }

    /// Header size in bytes, as stored in the first field.
    pub fn size(&self) -> u32 {
        match self {
            Self::Core(_) => CORE_HEADER_SIZE,
            Self::Extended(_) => EXTENDED_HEADER_SIZE,
        }
    }

    /// BMP version number: 3 for `BITMAPINFOHEADER`, 5 for `BITMAPV5HEADER`.
    pub fn version(&self) -> u8 {
        match self {
            Self::Core(_) => 3,
            Self::Extended(_) => 5,
        }
    }

    pub fn width(&self) -> i32 {
        self.core().width
    }

    pub fn height(&self) -> i32 {
        self.core().height
    }

    /// Number of rows regardless of storage direction.
    pub fn abs_height(&self) -> u32 {
        self.core().height.unsigned_abs()
    }

    /// Negative height means rows are stored top row first.
    pub fn is_top_down(&self) -> bool {
        self.core().height < 0
    }

    pub fn planes(&self) -> u16 {
        self.core().planes
    }

    pub fn bit_depth(&self) -> u16 {
        self.core().bit_count
    }

    pub fn compression(&self) -> Compression {
        self.core().compression
    }

    /// Whether pixels are palette indices (bit depth of 8 or less).
    pub fn is_indexed(&self) -> bool {
        self.bit_depth() <= 8
    }

    /// Number of palette entries stored after the header.
    ///
    /// `2^bit_depth` for indexed images, reduced to `colors_used` when the
    /// file declares a shorter table. Zero for direct-color images.
    pub fn color_count(&self) -> usize {
        let depth = self.bit_depth();
        if depth > 8 {
            return 0;
        }
        let full = 1usize << depth;
        match self.core().colors_used as usize {
            used if used > 0 && used < full => used,
            _ => full,
        }
    }

    /// Serialize the header, starting with its size field.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.size().to_le_bytes());
        match self {
            Self::Core(core) => core.write_body(out),
            Self::Extended(ext) => ext.write_body(out),
        }
    }
}

/// Read the info header, selecting the version from its size field.
pub fn read_info_header(reader: &mut ByteReader<'_>) -> Result<InfoHeader, BmpError> {
    let size = reader.read_u32_le()?;
    let header = match size {
        CORE_HEADER_SIZE => InfoHeader::Core(CoreInfoHeader::read_body(reader)?),
        EXTENDED_HEADER_SIZE => InfoHeader::Extended(ExtendedInfoHeader::read_body(reader)?),
        other => return Err(BmpError::UnrecognizedHeaderSize(other)),
    };
    log::trace!(
        "BMP v{} header: {}x{}, {} bpp, {}",
        header.version(),
        header.width(),
        header.height(),
        header.bit_depth(),
        header.compression()
    );
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn core_header(bit_count: u16, compression: Compression) -> CoreInfoHeader {
        CoreInfoHeader {
            width: 7,
            height: -3,
            planes: 1,
            bit_count,
            compression,
            image_size: 0,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            colors_important: 0,
        }
    }

    #[test]
    fn file_header_signature_checked_first() {
        // Only two bytes: a bad signature must be reported, not EOF.
        let mut r = ByteReader::new(b"PN");
        match read_file_header(&mut r) {
            Err(BmpError::InvalidSignature { found }) => assert_eq!(&found, b"PN"),
            other => panic!("expected InvalidSignature, got {other:?}"),
        }
    }

    #[test]
    fn file_header_reads_fourteen_bytes() {
        let mut data = vec![b'B', b'M'];
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&54u32.to_le_bytes());
        let mut r = ByteReader::new(&data);
        let fh = read_file_header(&mut r).unwrap();
        assert_eq!(r.position(), FILE_HEADER_SIZE as usize);
        assert_eq!(fh.file_size, 1000);
        assert_eq!(fh.data_offset, 54);
    }

    #[test]
    fn size_field_selects_version() {
        let mut bytes = Vec::new();
        InfoHeader::Core(core_header(24, Compression::Rgb)).write_to(&mut bytes);
        assert_eq!(bytes.len(), CORE_HEADER_SIZE as usize);
        let parsed = read_info_header(&mut ByteReader::new(&bytes)).unwrap();
        assert_eq!(parsed.version(), 3);
        assert!(parsed.extended().is_none());

        let mut bytes = Vec::new();
        let ext = ExtendedInfoHeader::srgb(core_header(32, Compression::Bitfields));
        InfoHeader::Extended(ext).write_to(&mut bytes);
        assert_eq!(bytes.len(), EXTENDED_HEADER_SIZE as usize);
        let parsed = read_info_header(&mut ByteReader::new(&bytes)).unwrap();
        assert_eq!(parsed, InfoHeader::Extended(ext));
        assert_eq!(parsed.size(), 124);
    }

    #[test]
    fn other_sizes_rejected() {
        for size in [0u32, 12, 16, 52, 56, 64, 108, 999] {
            let mut bytes = size.to_le_bytes().to_vec();
            bytes.extend_from_slice(&[0u8; 120]);
            match read_info_header(&mut ByteReader::new(&bytes)) {
                Err(BmpError::UnrecognizedHeaderSize(s)) => assert_eq!(s, size),
                other => panic!("size {size}: expected UnrecognizedHeaderSize, got {other:?}"),
            }
        }
    }

    #[test]
    fn truncated_extended_header_is_eof() {
        let mut bytes = Vec::new();
        InfoHeader::Extended(ExtendedInfoHeader::srgb(core_header(32, Compression::Rgb)))
            .write_to(&mut bytes);
        bytes.truncate(100);
        assert!(matches!(
            read_info_header(&mut ByteReader::new(&bytes)),
            Err(BmpError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn color_count_by_depth() {
        let h = |bits, used| {
            let mut c = core_header(bits, Compression::Rgb);
            c.colors_used = used;
            InfoHeader::Core(c)
        };
        assert_eq!(h(1, 0).color_count(), 2);
        assert_eq!(h(4, 0).color_count(), 16);
        assert_eq!(h(8, 0).color_count(), 256);
        assert_eq!(h(8, 17).color_count(), 17);
        // Out-of-range used count falls back to the full table.
        assert_eq!(h(4, 300).color_count(), 16);
        assert_eq!(h(24, 0).color_count(), 0);
        assert_eq!(h(32, 5).color_count(), 0);
    }

    #[test]
    fn compression_values_roundtrip() {
        for v in 0..8u32 {
            assert_eq!(Compression::from_u32(v).to_u32(), v);
        }
        assert_eq!(Compression::from_u32(1), Compression::Rle8);
        assert_eq!(Compression::from_u32(9), Compression::Unknown(9));
    }

    #[test]
    fn top_down_height() {
        let h = InfoHeader::Core(core_header(8, Compression::Rgb));
        assert!(h.is_top_down());
        assert_eq!(h.abs_height(), 3);
    }
}
