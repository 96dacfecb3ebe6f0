use byteorder::{ByteOrder, LE};

use crate::{Error, Result};

/// How malformed text inside a length-prefixed string is handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StringPolicy {
    /// Invalid sequences become U+FFFD
    #[default]
    Lossy,
    /// Invalid sequences fail with [`Error::InvalidString`]
    Strict,
}

/// Forward-only reader over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
    /// Returns the next `n` bytes and advances past them.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(n).ok_or(Error::UnexpectedEnd {
            offset: self.position,
            needed: n,
            remaining: self.remaining(),
        })?;
        self.position += n;
        Ok(bytes)
    }
    /// Returns the next `n` bytes without advancing, or `None` if fewer remain.
    pub fn peek(&self, n: usize) -> Option<&'a [u8]> {
        let end = self.position.checked_add(n)?;
        self.data.get(self.position..end)
    }

    /// Reads an FString: i32 length, positive for UTF-8 bytes and negative for
    /// UTF-16LE code units, both counts including the NUL terminator. Trailing
    /// NULs are dropped, embedded ones kept.
    pub fn read_fstring(&mut self, policy: StringPolicy) -> Result<String> {
        let start = self.position;
        let len = LE::read_i32(self.read(4)?);
        let string = if len >= 0 {
            let bytes = self.read(len as usize)?;
            let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            match policy {
                StringPolicy::Lossy => String::from_utf8_lossy(&bytes[..end]).into_owned(),
                StringPolicy::Strict => std::str::from_utf8(&bytes[..end])
                    .map_err(|_| Error::InvalidString { offset: start })?
                    .to_owned(),
            }
        } else {
            let units = len.unsigned_abs() as usize;
            let bytes = self.read(units.checked_mul(2).ok_or(Error::UnexpectedEnd {
                offset: self.position,
                needed: usize::MAX,
                remaining: self.remaining(),
            })?)?;
            let mut chars: Vec<u16> = bytes.chunks_exact(2).map(LE::read_u16).collect();
            let end = chars.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
            chars.truncate(end);
            match policy {
                StringPolicy::Lossy => String::from_utf16_lossy(&chars),
                StringPolicy::Strict => String::from_utf16(&chars)
                    .map_err(|_| Error::InvalidString { offset: start })?,
            }
        };
        Ok(string)
    }
}
