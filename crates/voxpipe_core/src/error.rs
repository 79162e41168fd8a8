//! # Import Error Types
//!
//! Every fatal condition aborts the parse and surfaces as a [`VoxError`].
//! Conditions the importer can recover from are reported as [`VoxWarning`]s
//! and parsing continues.

use std::fmt;

use thiserror::Error;

/// Four-byte chunk identifier such as `MAIN` or `nTRN`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    /// Root chunk.
    pub const MAIN: Self = Self(*b"MAIN");
    /// Model dimensions.
    pub const SIZE: Self = Self(*b"SIZE");
    /// Model voxels.
    pub const XYZI: Self = Self(*b"XYZI");
    /// Palette.
    pub const RGBA: Self = Self(*b"RGBA");
    /// Transform node.
    pub const TRANSFORM: Self = Self(*b"nTRN");
    /// Group node.
    pub const GROUP: Self = Self(*b"nGRP");
    /// Shape node.
    pub const SHAPE: Self = Self(*b"nSHP");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", char::from(byte))?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({self})")
    }
}

/// Fatal errors that abort a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxError {
    /// The input buffer holds no bytes at all.
    #[error("file is empty")]
    EmptyFile,

    /// The input is shorter than the fixed file header.
    #[error("file too small: {len} bytes, need at least {required}")]
    TooSmall {
        /// Actual length.
        len: usize,
        /// Minimum length.
        required: usize,
    },

    /// The input does not start with `"VOX "`.
    #[error("invalid file prefix: expected 'VOX ', got '{found}'")]
    InvalidFilePrefix {
        /// The four bytes found instead.
        found: ChunkId,
    },

    /// A chunk appeared before the first `MAIN`.
    #[error("first chunk must be MAIN, got {found}")]
    WrongFirstItem {
        /// The chunk found instead.
        found: ChunkId,
    },

    /// A chunk that may only appear once appeared again.
    #[error("duplicate {chunk} chunk")]
    DuplicateItem {
        /// The duplicated chunk.
        chunk: ChunkId,
    },

    /// A declared size is inconsistent with the chunk or the file.
    #[error("invalid size in {chunk} chunk: {reason}")]
    InvalidSize {
        /// The offending chunk.
        chunk: ChunkId,
        /// What was wrong.
        reason: &'static str,
    },

    /// A chunk body could not be decoded.
    #[error("corrupt value in {chunk} chunk: {reason}")]
    CorruptValue {
        /// The offending chunk.
        chunk: ChunkId,
        /// What was wrong.
        reason: &'static str,
    },

    /// An `XYZI` chunk without a preceding `SIZE` chunk.
    #[error("XYZI chunk without preceding SIZE chunk")]
    MissingSize,

    /// A declared count or size exceeds what the input can hold.
    #[error("{chunk} chunk too large: requested {requested}, available {available}")]
    TooLarge {
        /// The offending chunk.
        chunk: ChunkId,
        /// Requested amount.
        requested: u64,
        /// Available amount.
        available: u64,
    },

    /// A voxel coordinate lies outside the declared model size.
    #[error("voxel ({x}, {y}, {z}) outside model of size {size:?}")]
    IndexOutOfBounds {
        /// X coordinate (engine axes).
        x: u32,
        /// Y coordinate (engine axes).
        y: u32,
        /// Z coordinate (engine axes).
        z: u32,
        /// Model size (engine axes).
        size: [u32; 3],
    },

    /// Chunks are nested deeper than the configured limit.
    #[error("chunks nested too deep: {depth} > {max}")]
    TooDeep {
        /// Attempted depth.
        depth: usize,
        /// Configured limit.
        max: usize,
    },

    /// Input ended in the middle of a chunk header.
    #[error("truncated chunk header at offset {offset}")]
    MissingHeader {
        /// Byte offset of the truncated header.
        offset: usize,
    },

    /// No `RGBA` palette chunk.
    #[error("missing RGBA palette chunk")]
    MissingFormatChunk,

    /// No `XYZI` voxel chunk.
    #[error("missing XYZI voxel data chunk")]
    MissingDataChunks,

    /// File could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Import configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VoxError {
    /// Stable numeric code for logs and process exit status.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::EmptyFile => 1,
            Self::TooSmall { .. } => 2,
            Self::InvalidFilePrefix { .. } => 3,
            Self::WrongFirstItem { .. } => 4,
            Self::DuplicateItem { .. } => 5,
            Self::InvalidSize { .. } => 6,
            Self::CorruptValue { .. } => 7,
            Self::MissingSize => 8,
            Self::TooLarge { .. } => 9,
            Self::IndexOutOfBounds { .. } => 10,
            Self::TooDeep { .. } => 11,
            Self::MissingHeader { .. } => 12,
            Self::MissingFormatChunk => 13,
            Self::MissingDataChunks => 14,
            Self::Io(_) => 15,
            Self::InvalidConfig(_) => 16,
        }
    }
}

impl From<std::io::Error> for VoxError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Recoverable conditions. Parsing continues after each one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxWarning {
    /// File version is neither 150 nor 200.
    #[error("unexpected file version {0}")]
    UnsupportedVersion(u32),

    /// Chunk with an unrecognised id was skipped.
    #[error("skipped unknown chunk {0}")]
    UnknownChunk(ChunkId),

    /// A group node lists more children than the configured limit.
    #[error("node {node} has {count} children, keeping {limit}")]
    TooManyChildren {
        /// Node id.
        node: i32,
        /// Declared count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A transform node lists more frames than the configured limit.
    #[error("node {node} has {count} frames, keeping {limit}")]
    TooManyFrames {
        /// Node id.
        node: i32,
        /// Declared count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A shape node lists more models than the configured limit.
    #[error("node {node} has {count} models, keeping {limit}")]
    TooManyModels {
        /// Node id.
        node: i32,
        /// Declared count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// An optional node attribute could not be parsed and was ignored.
    #[error("node {node}: ignored attribute {key}='{value}'")]
    BadAttribute {
        /// Node id.
        node: i32,
        /// Attribute key.
        key: String,
        /// Raw attribute value.
        value: String,
    },

    /// A rotation code does not describe a valid rotation; identity is used.
    #[error("node {node}: invalid rotation code {code}")]
    BadRotation {
        /// Node id.
        node: i32,
        /// Packed rotation code.
        code: u8,
    },

    /// A shape node references a model that does not exist.
    #[error("shape node {node} references model {index}, only {frames} exist")]
    FrameIndexOutOfRange {
        /// Node id.
        node: i32,
        /// Referenced model index.
        index: i32,
        /// Number of models in the file.
        frames: usize,
    },

    /// The ancestor walk of a node revisited a node.
    #[error("scene graph cycle reached from node {node}")]
    SceneCycle {
        /// Node where the walk started.
        node: i32,
    },

    /// No palette chunk; the built-in default palette was used.
    #[error("missing RGBA chunk, using default palette")]
    MissingPalette,
}

/// Result type for import operations.
pub type VoxResult<T> = Result<T, VoxError>;
