//! Sequential little-endian reader over a byte slice.

use crate::error::BmpError;

/// Forward-only cursor that reads little-endian primitives.
///
/// Every read either returns the value and advances by exactly its width,
/// or fails with [`BmpError::UnexpectedEof`] and leaves the position
/// unchanged. There is no seeking backwards.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        if n > self.remaining() {
            return Err(BmpError::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Discard `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        self.take(n).map(|_| ())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Fill `buf` completely from the stream.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        buf.copy_from_slice(self.take(buf.len())?);
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, BmpError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_i16_le(&mut self) -> Result<i16, BmpError> {
        self.read_array().map(i16::from_le_bytes)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_array().map(i32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(r.read_i32_le().unwrap(), -2);
        assert_eq!(r.position(), data.len());
        assert!(r.is_empty());
    }

    #[test]
    fn short_read_reports_offset_and_keeps_position() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut r = ByteReader::new(&data);
        r.skip(1).unwrap();
        match r.read_u32_le() {
            Err(BmpError::UnexpectedEof { offset, needed }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 2);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
        assert_eq!(r.position(), 1);
        assert_eq!(r.read_u16_le().unwrap(), 0xCCBB);
    }

    #[test]
    fn skip_past_end_fails() {
        let mut r = ByteReader::new(&[0u8; 4]);
        assert!(r.skip(5).is_err());
        r.skip(4).unwrap();
        assert!(r.read_u8().is_err());
    }

    #[test]
    fn signed_sixteen_bit() {
        let mut r = ByteReader::new(&[0xFF, 0xFF, 0x00, 0x80]);
        assert_eq!(r.read_i16_le().unwrap(), -1);
        assert_eq!(r.read_i16_le().unwrap(), i16::MIN);
    }
}
