//! # VOXPIPE Core
//!
//! Data model shared by every stage of the voxel import pipeline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  .vox bytes → Chunk Parser → Scene Resolver → Mesher      │
//! │                    ↓               ↓            ↓         │
//! │               FrameSet ──────── Frame ──── FrameMesh      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate owns the data ([`Frame`], [`FrameSet`], [`Palette`]), the
//! error taxonomy ([`VoxError`], [`VoxWarning`]) and the import limits
//! ([`ImportConfig`]). It never parses bytes and never talks to a GPU.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod rotation;

pub use color::{Palette, VoxColor, PALETTE_BYTES, PALETTE_LEN};
pub use config::ImportConfig;
pub use error::{ChunkId, VoxError, VoxResult, VoxWarning};
pub use frame::{Frame, FrameId, FrameIdCounter, FrameMesh, FrameSet, FrameSize, MeshHandle};
pub use rotation::Rotation;
