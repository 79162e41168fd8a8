//! # Face-Culling Triangulator
//!
//! Emits one unit quad for every voxel face that borders empty space or the
//! grid boundary. Faces shared by two solid voxels are culled; coplanar
//! faces are not merged.
//!
//! Face orientation, corner positions and winding come from block-mesh's
//! right-handed Y-up face table, so output matches the rest of the renderer.
//!
//! ## Capacity
//!
//! A solid voxel exposes at most six faces. The solid voxels are counted
//! first and both buffers are reserved for `6 * solid` faces, so the voxel
//! loop never grows a buffer.

use block_mesh::{OrientedBlockFace, UnorientedQuad, RIGHT_HANDED_Y_UP_CONFIG};
use voxpipe_core::{Frame, FrameMesh, FrameSet, VoxColor};

use crate::backend::MeshBackend;
use crate::vertex::VoxelVertex;

/// Vertices per emitted face.
pub const VERTICES_PER_FACE: usize = 4;

/// Indices per emitted face (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// Outcome of one triangulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Faces emitted.
    pub faces: usize,
    /// Vertices emitted.
    pub vertices: usize,
    /// Indices emitted.
    pub indices: usize,
    /// Faces reserved before the voxel loop.
    pub capacity_faces: usize,
}

impl MeshStats {
    /// Triangle count.
    #[must_use]
    pub const fn triangles(&self) -> usize {
        self.indices / 3
    }

    fn accumulate(&mut self, other: Self) {
        self.faces += other.faces;
        self.vertices += other.vertices;
        self.indices += other.indices;
        self.capacity_faces += other.capacity_faces;
    }
}

/// Reusable mesh builder.
pub struct Triangulator {
    vertices: Vec<VoxelVertex>,
    indices: Vec<u32>,
    faces: [OrientedBlockFace; 6],
    normals: [[i32; 3]; 6],
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulator {
    /// Creates a triangulator with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        let normals = RIGHT_HANDED_Y_UP_CONFIG.faces.map(|face| {
            let n = face.signed_normal();
            [n.x, n.y, n.z]
        });
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            faces: RIGHT_HANDED_Y_UP_CONFIG.faces,
            normals,
        }
    }

    /// Vertices of the last built mesh.
    #[must_use]
    pub fn vertices(&self) -> &[VoxelVertex] {
        &self.vertices
    }

    /// Indices of the last built mesh.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Builds the mesh of `frame` into the scratch buffers without uploading.
    pub fn build(&mut self, frame: &Frame) -> MeshStats {
        let capacity_faces = frame.solid_count() * 6;
        self.vertices.clear();
        self.indices.clear();
        self.vertices.reserve(capacity_faces * VERTICES_PER_FACE);
        self.indices.reserve(capacity_faces * INDICES_PER_FACE);

        let size = frame.size();
        for y in 0..size.height {
            for z in 0..size.depth {
                for x in 0..size.width {
                    let Some(color) = frame.get(x, y, z) else { continue };
                    if color.is_empty() {
                        continue;
                    }
                    self.emit_voxel(frame, [x, y, z], color);
                }
            }
        }

        MeshStats {
            faces: self.indices.len() / INDICES_PER_FACE,
            vertices: self.vertices.len(),
            indices: self.indices.len(),
            capacity_faces,
        }
    }

    fn emit_voxel(&mut self, frame: &Frame, voxel: [u32; 3], color: VoxColor) {
        let color = color.as_float();
        for (face, normal) in self.faces.iter().zip(self.normals) {
            if !exposed(frame, voxel, normal) {
                continue;
            }

            let quad = UnorientedQuad { minimum: voxel, width: 1, height: 1 };
            #[allow(clippy::cast_possible_truncation)]
            let base = self.vertices.len() as u32;
            #[allow(clippy::cast_precision_loss)]
            let normal = normal.map(|n| n as f32);
            for position in face.quad_mesh_positions(&quad, 1.0) {
                self.vertices.push(VoxelVertex {
                    position,
                    color,
                    normal,
                    uv: [0.0, 0.0],
                });
            }
            self.indices.extend_from_slice(&face.quad_mesh_indices(base));
        }
    }

    /// Rebuilds and uploads the mesh of one frame.
    ///
    /// The previous mesh is released before the new one is uploaded. A frame
    /// without solid voxels ends up with no mesh.
    pub fn triangulate_frame<B: MeshBackend>(
        &mut self,
        frame: &mut Frame,
        backend: &mut B,
    ) -> MeshStats {
        free_frame(frame, backend);

        let stats = self.build(frame);
        let mesh = (stats.faces > 0).then(|| FrameMesh {
            handle: backend.upload_mesh(&self.vertices, &self.indices),
            vertex_count: stats.vertices,
            index_count: stats.indices,
        });
        let previous = frame.install_mesh(mesh);
        debug_assert!(previous.is_none());

        tracing::debug!(
            frame = frame.id().0,
            faces = stats.faces,
            capacity = stats.capacity_faces,
            "triangulated frame"
        );
        stats
    }

    /// Triangulates every frame not yet triangulated and marks the set.
    pub fn triangulate_frame_set<B: MeshBackend>(
        &mut self,
        set: &mut FrameSet,
        backend: &mut B,
    ) -> MeshStats {
        let mut total = MeshStats::default();
        for frame in set.frames_mut() {
            if !frame.is_triangulated() {
                total.accumulate(self.triangulate_frame(frame, backend));
            }
        }
        set.set_triangulated(true);
        total
    }
}

/// True if the face of `voxel` along `normal` borders empty space or the grid edge.
fn exposed(frame: &Frame, voxel: [u32; 3], normal: [i32; 3]) -> bool {
    let [x, y, z] = voxel;
    let neighbor = x
        .checked_add_signed(normal[0])
        .zip(y.checked_add_signed(normal[1]))
        .zip(z.checked_add_signed(normal[2]));
    match neighbor {
        Some(((nx, ny), nz)) => frame.get(nx, ny, nz).map_or(true, VoxColor::is_empty),
        None => true,
    }
}

/// Releases the mesh of one frame.
pub fn free_frame<B: MeshBackend>(frame: &mut Frame, backend: &mut B) {
    if let Some(mesh) = frame.take_mesh() {
        backend.release_mesh(mesh.handle);
    }
}

/// Releases every mesh of a set and clears its triangulated flag.
pub fn free_frame_set<B: MeshBackend>(set: &mut FrameSet, backend: &mut B) {
    for frame in set.frames_mut() {
        free_frame(frame, backend);
    }
    set.set_triangulated(false);
}
