//! # VOXPIPE Format
//!
//! Decodes the chunked `"VOX "` voxel container into a [`FrameSet`].
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─> ChunkParser ─┬─> FrameSet (dense grids, final colors)
//!                       └─> SceneGraph (scratch) ─> resolve ─> positions / names
//! ```
//!
//! The scene graph and all dictionaries live only for the duration of one
//! [`VoxImporter::import`] call. Malformed input never panics: every read is
//! bounds-checked and fatal conditions surface as [`VoxError`]s.
//!
//! [`FrameSet`]: voxpipe_core::FrameSet
//! [`VoxError`]: voxpipe_core::VoxError

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod cursor;
pub mod dictionary;
pub mod importer;
pub mod loader;
pub mod parser;
pub mod scene;

pub use chunk::{ChunkHeader, VOX_MAGIC};
pub use cursor::ByteCursor;
pub use dictionary::Dictionary;
pub use importer::VoxImporter;
pub use loader::{VoxAssetDirectory, VoxLoader};
pub use parser::{ChunkParser, ParsedFile};
pub use scene::{NodeKind, SceneGraph, SceneNode, ShapeModel, TransformFrame};

use voxpipe_core::VoxWarning;

/// Logs a recoverable condition and records it.
pub(crate) fn report(warnings: &mut Vec<VoxWarning>, warning: VoxWarning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}
