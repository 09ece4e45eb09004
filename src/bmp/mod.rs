//! BMP container: headers, color table, pixel array, and the encoder.
//!
//! Layout of a file, all integers little-endian:
//!
//! | Offset | Field |
//! |---|---|
//! | 0 | `"BM"` |
//! | 2 | file size (informational) |
//! | 6 | reserved |
//! | 10 | pixel data offset (informational, never seeked to) |
//! | 14 | info header, 40 or 124 bytes |
//! | after header | color table, 4 bytes per entry, only for ≤ 8 bpp |
//! | after table | scanlines, bottom-up unless height is negative, each padded to 4 bytes |

pub(crate) mod encode;
mod header;
mod palette;
mod raster;
mod utils;

pub use header::{
    CORE_HEADER_SIZE, CieXyz, CieXyzTriple, Compression, CoreInfoHeader, EXTENDED_HEADER_SIZE,
    ExtendedInfoHeader, FILE_HEADER_SIZE, FileHeader, InfoHeader, SIGNATURE, read_file_header,
    read_info_header,
};
pub use palette::{Palette, PaletteEntry, read_color_table};
pub use raster::read_raster;
pub(crate) use raster::read_raster_with_limits;
pub use utils::bytes_per_line;
