//! # VOXPIPE
//!
//! Imports chunked `"VOX "` voxel models and turns them into meshes.
//!
//! ```text
//! ┌───────────┐    ┌──────────────┐    ┌────────────────┐    ┌──────────────┐
//! │ file bytes│ ─> │ ChunkParser  │ ─> │ SceneGraph     │ ─> │ Triangulator │ ─> MeshBackend
//! └───────────┘    │ (FrameSet)   │    │ (positions,    │    │ (culled      │
//!                  └──────────────┘    │  names)        │    │  faces)      │
//!                                      └────────────────┘    └──────────────┘
//! ```
//!
//! [`VoxPipeline`] runs all three stages in one call. The stage crates are
//! re-exported for callers that need finer control.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod pipeline;

pub use pipeline::VoxPipeline;

pub use voxpipe_core::{
    Frame, FrameId, FrameMesh, FrameSet, FrameSize, ImportConfig, MeshHandle, Palette, Rotation,
    VoxColor, VoxError, VoxResult, VoxWarning,
};
pub use voxpipe_format::{VoxAssetDirectory, VoxImporter, VoxLoader};
pub use voxpipe_mesh::{MemoryMeshBackend, MeshBackend, MeshStats, Triangulator, VoxelVertex};
