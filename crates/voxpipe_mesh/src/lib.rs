//! # VOXPIPE Mesh
//!
//! Turns dense voxel frames into triangle meshes.
//!
//! ```text
//! Frame ──> Triangulator ──> (Vec<VoxelVertex>, Vec<u32>) ──> MeshBackend ──> MeshHandle
//! ```
//!
//! The triangulator culls every face shared by two solid voxels and emits a
//! unit quad for each remaining one. Buffers live in the triangulator and are
//! reused across frames; the backend receives borrowed slices.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod triangulator;
pub mod vertex;

pub use backend::{MemoryMeshBackend, MeshBackend, StoredMesh};
pub use triangulator::{free_frame, free_frame_set, MeshStats, Triangulator};
pub use vertex::VoxelVertex;
