//! # Chunk Framing
//!
//! ```text
//! File:
//! ├── "VOX " (4 bytes) - Magic number
//! ├── Version (u32)    - 150 or 200
//! └── Chunk stream
//!
//! Chunk:
//! ├── id            (4 bytes ASCII)
//! ├── data_size     (u32 LE)
//! ├── children_size (u32 LE)
//! ├── data          (data_size bytes)
//! └── children      (children_size bytes of nested chunks)
//! ```
//!
//! Files are Z-up; the engine is Y-up. [`to_engine_axes`] is applied to every
//! coordinate and translation read from a file.

use voxpipe_core::ChunkId;

use crate::cursor::ByteCursor;

/// File magic number.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// File versions accepted without a warning.
pub const SUPPORTED_VERSIONS: [u32; 2] = [150, 200];

/// Magic plus version.
pub const FILE_HEADER_LEN: usize = 8;

/// Id plus both sizes.
pub const CHUNK_HEADER_LEN: usize = 12;

/// Header preceding every chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Chunk id.
    pub id: ChunkId,
    /// Payload length in bytes.
    pub data_size: u32,
    /// Length in bytes of the nested chunk region.
    pub children_size: u32,
}

impl ChunkHeader {
    /// Reads a header, leaving the cursor untouched if fewer than
    /// [`CHUNK_HEADER_LEN`] bytes remain.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Option<Self> {
        if cursor.remaining() < CHUNK_HEADER_LEN {
            return None;
        }
        Some(Self {
            id: ChunkId(cursor.read_array()?),
            data_size: cursor.read_u32()?,
            children_size: cursor.read_u32()?,
        })
    }

    /// Payload plus children, in bytes.
    #[must_use]
    pub const fn body_len(&self) -> u64 {
        self.data_size as u64 + self.children_size as u64
    }
}

/// Maps a file-space `[x, y, z]` (Z up) to engine space (Y up).
#[inline]
#[must_use]
pub fn to_engine_axes<T: Copy>(v: [T; 3]) -> [T; 3] {
    [v[0], v[2], v[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_header() {
        let mut data = b"SIZE".to_vec();
        data.extend(12u32.to_le_bytes());
        data.extend(0u32.to_le_bytes());

        let mut cursor = ByteCursor::new(&data);
        let header = ChunkHeader::read(&mut cursor).unwrap();
        assert_eq!(header.id, ChunkId::SIZE);
        assert_eq!(header.data_size, 12);
        assert_eq!(header.children_size, 0);
        assert_eq!(header.body_len(), 12);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_truncated_header() {
        let data = b"MAIN\0\0\0\0\0\0\0";
        let mut cursor = ByteCursor::new(data);
        assert!(ChunkHeader::read(&mut cursor).is_none());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_axis_swap() {
        assert_eq!(to_engine_axes([1, 2, 3]), [1, 3, 2]);
    }
}
