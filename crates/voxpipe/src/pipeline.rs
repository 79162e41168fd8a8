//! # Import Pipeline
//!
//! Decode, resolve and triangulate in one call.

use std::path::Path;

use voxpipe_core::{FrameSet, ImportConfig, VoxResult};
use voxpipe_format::{VoxImporter, VoxLoader};
use voxpipe_mesh::{free_frame_set, MeshBackend, MeshStats, Triangulator};

/// Importer and triangulator bundled for whole-file imports.
#[derive(Default)]
pub struct VoxPipeline {
    importer: VoxImporter,
    triangulator: Triangulator,
}

impl VoxPipeline {
    /// Creates a pipeline with validated limits.
    ///
    /// # Errors
    ///
    /// [`VoxError::InvalidConfig`](voxpipe_core::VoxError::InvalidConfig) if a limit is out of
    /// range.
    pub fn new(config: ImportConfig) -> VoxResult<Self> {
        Ok(Self {
            importer: VoxImporter::new(config)?,
            triangulator: Triangulator::new(),
        })
    }

    /// The importer, for copies and manual frame creation.
    pub fn importer(&mut self) -> &mut VoxImporter {
        &mut self.importer
    }

    /// Imports `data` and uploads a mesh for every frame.
    ///
    /// A failed import returns an empty, invalid set carrying the error; no
    /// mesh is uploaded for it.
    pub fn import<B: MeshBackend>(&mut self, data: &[u8], backend: &mut B) -> FrameSet {
        let mut frames = self.importer.import(data);
        if frames.is_valid() {
            self.triangulate(&mut frames, backend);
        }
        frames
    }

    /// Loads a file from disk and uploads a mesh for every frame.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or has invalid format.
    pub fn load<P: AsRef<Path>, B: MeshBackend>(
        &mut self,
        path: P,
        backend: &mut B,
    ) -> VoxResult<FrameSet> {
        let mut frames = VoxLoader::load(path, &mut self.importer)?;
        self.triangulate(&mut frames, backend);
        Ok(frames)
    }

    /// Triangulates every frame that is not triangulated yet.
    pub fn triangulate<B: MeshBackend>(
        &mut self,
        frames: &mut FrameSet,
        backend: &mut B,
    ) -> MeshStats {
        let stats = self.triangulator.triangulate_frame_set(frames, backend);
        tracing::debug!(
            frames = frames.len(),
            faces = stats.faces,
            vertices = stats.vertices,
            "frame set triangulated"
        );
        stats
    }

    /// Releases every mesh of `frames`.
    pub fn release<B: MeshBackend>(frames: &mut FrameSet, backend: &mut B) {
        free_frame_set(frames, backend);
    }
}
