use byteorder::{ByteOrder, LE};

use crate::{ByteCursor, Result, StringPolicy};

/// Little-endian reads shared by the raw [`ByteCursor`] and the decode context.
pub trait ArchiveReader {
    fn read_bytes(&mut self, n: usize) -> Result<&[u8]>;
    fn peek_bytes(&self, n: usize) -> Option<&[u8]>;
    fn position(&self) -> usize;
    fn remaining(&self) -> usize;
    fn read_string(&mut self) -> Result<String>;

    fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }
    fn read_u16(&mut self) -> Result<u16> {
        Ok(LE::read_u16(self.read_bytes(2)?))
    }
    fn read_u32(&mut self) -> Result<u32> {
        Ok(LE::read_u32(self.read_bytes(4)?))
    }
    fn read_i32(&mut self) -> Result<i32> {
        Ok(LE::read_i32(self.read_bytes(4)?))
    }
    fn read_u64(&mut self) -> Result<u64> {
        Ok(LE::read_u64(self.read_bytes(8)?))
    }
    fn read_i64(&mut self) -> Result<i64> {
        Ok(LE::read_i64(self.read_bytes(8)?))
    }
    fn read_f32(&mut self) -> Result<f32> {
        Ok(LE::read_f32(self.read_bytes(4)?))
    }
    fn read_f64(&mut self) -> Result<f64> {
        Ok(LE::read_f64(self.read_bytes(8)?))
    }
}

impl ArchiveReader for ByteCursor<'_> {
    fn read_bytes(&mut self, n: usize) -> Result<&[u8]> {
        self.read(n)
    }
    fn peek_bytes(&self, n: usize) -> Option<&[u8]> {
        self.peek(n)
    }
    fn position(&self) -> usize {
        ByteCursor::position(self)
    }
    fn remaining(&self) -> usize {
        ByteCursor::remaining(self)
    }
    fn read_string(&mut self) -> Result<String> {
        self.read_fstring(StringPolicy::Lossy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian() {
        let data = [
            0x2a, 0, 0, 0, // u32
            0xff, 0xff, 0xff, 0xff, // i32
            0x34, 0x12, // u16
            0, 0, 0x80, 0x3f, // f32 1.0
            0, 0, 0, 0, 0, 0, 0xf0, 0xbf, // f64 -1.0
        ];
        let mut ar = ByteCursor::new(&data);
        assert_eq!(ar.read_u32().unwrap(), 42);
        assert_eq!(ar.read_i32().unwrap(), -1);
        assert_eq!(ar.read_u16().unwrap(), 0x1234);
        assert_eq!(ar.read_f32().unwrap(), 1.0);
        assert_eq!(ar.read_f64().unwrap(), -1.0);
        assert_eq!(ArchiveReader::remaining(&ar), 0);
        assert!(ar.read_u8().is_err());
    }
}
