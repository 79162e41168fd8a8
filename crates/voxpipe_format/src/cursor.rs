//! # Byte Cursor
//!
//! Bounds-checked little-endian reads over a borrowed byte slice.
//!
//! Every read returns `None` instead of running past the end, and a failed
//! read leaves the cursor where it was. Chunk bodies are only ever decoded
//! through this type.

use crate::dictionary::Dictionary;

/// Cursor over an immutable byte slice.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// True when every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads `n` bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let bytes = &self.buffer[self.position..self.position + n];
        self.position += n;
        Some(bytes)
    }

    /// Reads a fixed-size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Some(array)
    }

    /// Advances past `n` bytes.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Option<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a u32 in little-endian format.
    #[inline]
    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads an i32 in little-endian format.
    #[inline]
    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a non-negative i32 count.
    #[inline]
    pub fn read_count(&mut self) -> Option<usize> {
        let start = self.position;
        match self.read_i32().map(usize::try_from) {
            Some(Ok(count)) => Some(count),
            _ => {
                self.position = start;
                None
            }
        }
    }

    /// Reads an i32 length followed by that many bytes of text.
    ///
    /// Invalid UTF-8 is replaced, never rejected.
    pub fn read_string(&mut self) -> Option<String> {
        let start = self.position;
        let text = self
            .read_count()
            .and_then(|len| self.read_bytes(len))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
        if text.is_none() {
            self.position = start;
        }
        text
    }

    /// Reads an i32 entry count followed by that many key/value string pairs.
    pub fn read_dictionary(&mut self) -> Option<Dictionary> {
        let start = self.position;
        let dictionary = self.read_dictionary_entries();
        if dictionary.is_none() {
            self.position = start;
        }
        dictionary
    }

    fn read_dictionary_entries(&mut self) -> Option<Dictionary> {
        let count = self.read_count()?;
        // Each entry needs at least two length prefixes.
        if count > self.remaining() / 8 {
            return None;
        }
        let mut dictionary = Dictionary::with_capacity(count);
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            dictionary.push(key, value);
        }
        Some(dictionary)
    }
}
