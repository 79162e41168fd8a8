//! # Colors and Palettes
//!
//! Voxel colors are plain RGBA bytes. A voxel is empty iff its alpha is 0.
//!
//! Files reference colors through a 256-entry palette using 1-based indices;
//! [`Palette::lookup`] performs the decrement.

use bytemuck::{Pod, Zeroable};

/// Number of entries in a palette.
pub const PALETTE_LEN: usize = 256;

/// Size in bytes of an `RGBA` palette chunk payload.
pub const PALETTE_BYTES: usize = PALETTE_LEN * 4;

/// Default MagicaVoxel palette, packed `0xAABBGGRR`, indexed by 1-based color index.
static DEFAULT_PALETTE: &[u32; PALETTE_LEN] = &[
    0x00000000, 0xffffffff, 0xffccffff, 0xff99ffff, 0xff66ffff, 0xff33ffff, 0xff00ffff, 0xffffccff,
    0xffccccff, 0xff99ccff, 0xff66ccff, 0xff33ccff, 0xff00ccff, 0xffff99ff, 0xffcc99ff, 0xff9999ff,
    0xff6699ff, 0xff3399ff, 0xff0099ff, 0xffff66ff, 0xffcc66ff, 0xff9966ff, 0xff6666ff, 0xff3366ff,
    0xff0066ff, 0xffff33ff, 0xffcc33ff, 0xff9933ff, 0xff6633ff, 0xff3333ff, 0xff0033ff, 0xffff00ff,
    0xffcc00ff, 0xff9900ff, 0xff6600ff, 0xff3300ff, 0xff0000ff, 0xffffffcc, 0xffccffcc, 0xff99ffcc,
    0xff66ffcc, 0xff33ffcc, 0xff00ffcc, 0xffffcccc, 0xffcccccc, 0xff99cccc, 0xff66cccc, 0xff33cccc,
    0xff00cccc, 0xffff99cc, 0xffcc99cc, 0xff9999cc, 0xff6699cc, 0xff3399cc, 0xff0099cc, 0xffff66cc,
    0xffcc66cc, 0xff9966cc, 0xff6666cc, 0xff3366cc, 0xff0066cc, 0xffff33cc, 0xffcc33cc, 0xff9933cc,
    0xff6633cc, 0xff3333cc, 0xff0033cc, 0xffff00cc, 0xffcc00cc, 0xff9900cc, 0xff6600cc, 0xff3300cc,
    0xff0000cc, 0xffffff99, 0xffccff99, 0xff99ff99, 0xff66ff99, 0xff33ff99, 0xff00ff99, 0xffffcc99,
    0xffcccc99, 0xff99cc99, 0xff66cc99, 0xff33cc99, 0xff00cc99, 0xffff9999, 0xffcc9999, 0xff999999,
    0xff669999, 0xff339999, 0xff009999, 0xffff6699, 0xffcc6699, 0xff996699, 0xff666699, 0xff336699,
    0xff006699, 0xffff3399, 0xffcc3399, 0xff993399, 0xff663399, 0xff333399, 0xff003399, 0xffff0099,
    0xffcc0099, 0xff990099, 0xff660099, 0xff330099, 0xff000099, 0xffffff66, 0xffccff66, 0xff99ff66,
    0xff66ff66, 0xff33ff66, 0xff00ff66, 0xffffcc66, 0xffcccc66, 0xff99cc66, 0xff66cc66, 0xff33cc66,
    0xff00cc66, 0xffff9966, 0xffcc9966, 0xff999966, 0xff669966, 0xff339966, 0xff009966, 0xffff6666,
    0xffcc6666, 0xff996666, 0xff666666, 0xff336666, 0xff006666, 0xffff3366, 0xffcc3366, 0xff993366,
    0xff663366, 0xff333366, 0xff003366, 0xffff0066, 0xffcc0066, 0xff990066, 0xff660066, 0xff330066,
    0xff000066, 0xffffff33, 0xffccff33, 0xff99ff33, 0xff66ff33, 0xff33ff33, 0xff00ff33, 0xffffcc33,
    0xffcccc33, 0xff99cc33, 0xff66cc33, 0xff33cc33, 0xff00cc33, 0xffff9933, 0xffcc9933, 0xff999933,
    0xff669933, 0xff339933, 0xff009933, 0xffff6633, 0xffcc6633, 0xff996633, 0xff666633, 0xff336633,
    0xff006633, 0xffff3333, 0xffcc3333, 0xff993333, 0xff663333, 0xff333333, 0xff003333, 0xffff0033,
    0xffcc0033, 0xff990033, 0xff660033, 0xff330033, 0xff000033, 0xffffff00, 0xffccff00, 0xff99ff00,
    0xff66ff00, 0xff33ff00, 0xff00ff00, 0xffffcc00, 0xffcccc00, 0xff99cc00, 0xff66cc00, 0xff33cc00,
    0xff00cc00, 0xffff9900, 0xffcc9900, 0xff999900, 0xff669900, 0xff339900, 0xff009900, 0xffff6600,
    0xffcc6600, 0xff996600, 0xff666600, 0xff336600, 0xff006600, 0xffff3300, 0xffcc3300, 0xff993300,
    0xff663300, 0xff333300, 0xff003300, 0xffff0000, 0xffcc0000, 0xff990000, 0xff660000, 0xff330000,
    0xff0000ee, 0xff0000dd, 0xff0000bb, 0xff0000aa, 0xff000088, 0xff000077, 0xff000055, 0xff000044,
    0xff000022, 0xff000011, 0xff00ee00, 0xff00dd00, 0xff00bb00, 0xff00aa00, 0xff008800, 0xff007700,
    0xff005500, 0xff004400, 0xff002200, 0xff001100, 0xffee0000, 0xffdd0000, 0xffbb0000, 0xffaa0000,
    0xff880000, 0xff770000, 0xff550000, 0xff440000, 0xff220000, 0xff110000, 0xffeeeeee, 0xffdddddd,
    0xffbbbbbb, 0xffaaaaaa, 0xff888888, 0xff777777, 0xff555555, 0xff444444, 0xff222222, 0xff111111,
];

/// RGBA voxel color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct VoxColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255). Zero marks an empty voxel.
    pub a: u8,
}

impl VoxColor {
    /// Fully transparent black, the color of an empty voxel.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a color from its components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates from packed RGBA u32 (`0xAABBGGRR`).
    #[inline]
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        }
    }

    /// Returns true if this color marks an empty voxel.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.a == 0
    }

    /// Returns true if all four channels hold the same byte.
    #[inline]
    #[must_use]
    pub const fn is_uniform(self) -> bool {
        self.r == self.g && self.g == self.b && self.b == self.a
    }

    /// Returns as normalized float array [r, g, b, a].
    #[inline]
    #[must_use]
    pub fn as_float(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// A 256-entry color table in file order.
///
/// Entry `i` holds the color of 1-based voxel color index `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [VoxColor; PALETTE_LEN],
}

impl Default for Palette {
    /// The built-in MagicaVoxel palette.
    fn default() -> Self {
        let mut colors = [VoxColor::EMPTY; PALETTE_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = VoxColor::from_packed(DEFAULT_PALETTE[(i + 1) % PALETTE_LEN]);
        }
        Self { colors }
    }
}

impl Palette {
    /// Builds a palette from an `RGBA` chunk payload.
    ///
    /// Returns `None` unless `bytes` is exactly [`PALETTE_BYTES`] long.
    #[must_use]
    pub fn from_rgba_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PALETTE_BYTES {
            return None;
        }
        let mut colors = [VoxColor::EMPTY; PALETTE_LEN];
        colors.copy_from_slice(bytemuck::cast_slice::<u8, VoxColor>(bytes));
        Some(Self { colors })
    }

    /// Resolves a 1-based color index as stored in `XYZI` records.
    ///
    /// Index 0 wraps around to the last entry.
    #[inline]
    #[must_use]
    pub fn lookup(&self, color_index: u8) -> VoxColor {
        self.colors[usize::from(color_index.wrapping_sub(1))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed() {
        let color = VoxColor::from_packed(0xFF11_2233);
        assert_eq!(color.r, 0x33);
        assert_eq!(color.g, 0x22);
        assert_eq!(color.b, 0x11);
        assert_eq!(color.a, 0xFF);
    }

    #[test]
    fn test_default_palette_lookup() {
        let palette = Palette::default();
        assert_eq!(palette.lookup(1), VoxColor::WHITE);
        // Index 0 wraps to the reserved transparent entry
        assert!(palette.lookup(0).is_empty());
        assert_eq!(palette.lookup(255), VoxColor::from_packed(0xff11_1111));
    }

    #[test]
    fn test_rgba_chunk_palette() {
        let mut bytes = vec![0u8; PALETTE_BYTES];
        bytes[0..4].copy_from_slice(&[10, 20, 30, 255]);
        bytes[4..8].copy_from_slice(&[1, 2, 3, 4]);

        let palette = Palette::from_rgba_bytes(&bytes).unwrap();
        assert_eq!(palette.lookup(1), VoxColor::new(10, 20, 30, 255));
        assert_eq!(palette.lookup(2), VoxColor::new(1, 2, 3, 4));
    }

    #[test]
    fn test_rgba_chunk_wrong_length() {
        assert!(Palette::from_rgba_bytes(&[0u8; 1020]).is_none());
        assert!(Palette::from_rgba_bytes(&[0u8; 1028]).is_none());
    }

    #[test]
    fn test_uniform_color() {
        assert!(VoxColor::EMPTY.is_uniform());
        assert!(VoxColor::WHITE.is_uniform());
        assert!(!VoxColor::new(1, 1, 1, 255).is_uniform());
    }

    #[test]
    fn test_as_float() {
        let [r, g, b, a] = VoxColor::new(255, 0, 51, 255).as_float();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        assert!((b - 0.2).abs() < 1e-6);
        assert!((a - 1.0).abs() < f32::EPSILON);
    }
}
