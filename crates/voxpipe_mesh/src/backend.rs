//! # Render Backend Seam
//!
//! The triangulator never owns GPU memory. It hands finished buffers to a
//! [`MeshBackend`] and keeps only the returned [`MeshHandle`].

use std::collections::HashMap;

use voxpipe_core::MeshHandle;

use crate::vertex::VoxelVertex;

/// Receives finished meshes.
pub trait MeshBackend {
    /// Uploads one vertex buffer and one 32-bit index buffer.
    fn upload_mesh(&mut self, vertices: &[VoxelVertex], indices: &[u32]) -> MeshHandle;

    /// Releases a mesh previously returned by [`upload_mesh`](Self::upload_mesh).
    fn release_mesh(&mut self, handle: MeshHandle);
}

/// Buffers held by [`MemoryMeshBackend`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredMesh {
    /// Vertex buffer.
    pub vertices: Vec<VoxelVertex>,
    /// Index buffer.
    pub indices: Vec<u32>,
}

impl StoredMesh {
    /// Triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Backend that keeps meshes in host memory.
///
/// Used by tools and tests; tracks live meshes so leaks are observable.
#[derive(Debug, Default)]
pub struct MemoryMeshBackend {
    meshes: HashMap<MeshHandle, StoredMesh>,
    next_handle: u64,
    uploads: usize,
}

impl MemoryMeshBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes uploaded and not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.meshes.len()
    }

    /// Total uploads since creation.
    #[must_use]
    pub const fn uploads(&self) -> usize {
        self.uploads
    }

    /// Buffers behind `handle`, if still live.
    #[must_use]
    pub fn mesh(&self, handle: MeshHandle) -> Option<&StoredMesh> {
        self.meshes.get(&handle)
    }
}

impl MeshBackend for MemoryMeshBackend {
    fn upload_mesh(&mut self, vertices: &[VoxelVertex], indices: &[u32]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.uploads += 1;
        self.meshes.insert(
            handle,
            StoredMesh {
                vertices: vertices.to_vec(),
                indices: indices.to_vec(),
            },
        );
        handle
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_none() {
            tracing::warn!(handle = handle.0, "release of unknown mesh");
        }
    }
}
