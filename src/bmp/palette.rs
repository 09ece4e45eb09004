//! Color table of indexed images.

use alloc::vec::Vec;

use super::header::InfoHeader;
use crate::error::BmpError;
use crate::reader::ByteReader;

/// One color table entry. Stored in the file as B, G, R, reserved.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PaletteEntry {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

#[cfg(feature = "rgb")]
impl From<PaletteEntry> for rgb::RGB8 {
    fn from(e: PaletteEntry) -> Self {
        rgb::RGB8::new(e.red, e.green, e.blue)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for PaletteEntry {
    fn from(c: rgb::RGB8) -> Self {
        PaletteEntry::new(c.r, c.g, c.b)
    }
}

/// Ordered color table; entry `i` is the color of raster index `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<PaletteEntry> {
        self.entries.get(usize::from(index)).copied()
    }

    /// Size of the table in the file (4 bytes per entry).
    pub fn byte_len(&self) -> usize {
        self.entries.len() * 4
    }

    /// Write entries as B, G, R, 0.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for e in &self.entries {
            out.extend_from_slice(&[e.blue, e.green, e.red, 0]);
        }
    }
}

/// Read `header.color_count()` entries. The reserved byte of each entry
/// is discarded.
pub fn read_color_table(
    header: &InfoHeader,
    reader: &mut ByteReader<'_>,
) -> Result<Palette, BmpError> {
    let count = header.color_count();
    let full = 1usize << header.bit_depth().min(8);
    if header.is_indexed() && count < full {
        log::debug!("BMP palette shortened to {count} of {full} entries by colors_used");
    }
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let [blue, green, red, _reserved] = reader.read_array::<4>()?;
        entries.push(PaletteEntry { red, green, blue });
    }
    Ok(Palette::new(entries))
}
