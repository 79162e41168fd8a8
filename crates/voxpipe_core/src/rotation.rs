//! Packed voxel-model rotations.
//!
//! A rotation byte encodes a signed permutation matrix:
//!
//! ```text
//! bits 0-1 : column index of the non-zero entry in row 0
//! bits 2-3 : column index of the non-zero entry in row 1
//! bit  4   : sign of row 0 (1 = negative)
//! bit  5   : sign of row 1
//! bit  6   : sign of row 2
//! ```
//!
//! Row 2's column is whichever index rows 0 and 1 do not use.

/// Row-major signed permutation matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    /// Matrix rows.
    pub rows: [[i8; 3]; 3],
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    /// The identity rotation (packed code `4`).
    pub const IDENTITY: Self = Self {
        rows: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    };

    /// Decodes a packed rotation byte.
    ///
    /// Returns `None` if the two encoded columns collide or are out of range.
    #[must_use]
    pub fn from_packed(code: u8) -> Option<Self> {
        let col0 = usize::from(code & 0b11);
        let col1 = usize::from((code >> 2) & 0b11);
        if col0 > 2 || col1 > 2 || col0 == col1 {
            return None;
        }
        let col2 = 3 - col0 - col1;

        let mut rows = [[0i8; 3]; 3];
        for (row, col) in [col0, col1, col2].into_iter().enumerate() {
            let negative = code & (1 << (4 + row)) != 0;
            rows[row][col] = if negative { -1 } else { 1 };
        }
        Some(Self { rows })
    }
}
