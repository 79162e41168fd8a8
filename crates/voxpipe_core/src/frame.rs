//! # Frames
//!
//! A [`Frame`] is one dense voxel grid (one model of a file). A [`FrameSet`]
//! owns every frame produced by one import.
//!
//! ## Layout
//!
//! ```text
//! colors[x + y * W + z * W * H]     (Y is up)
//! ```
//!
//! Generated meshes are render-backend resources, not plain data: copies never
//! carry them, and releasing them needs the backend that created them.

use ndshape::{RuntimeShape, Shape};

use crate::color::VoxColor;
use crate::error::{VoxError, VoxWarning};
use crate::rotation::Rotation;

/// Identifier tagging a frame. Unique per [`FrameIdCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u32);

/// Monotonic source of [`FrameId`]s, owned by whoever creates frames.
#[derive(Clone, Debug, Default)]
pub struct FrameIdCounter {
    next: u32,
}

impl FrameIdCounter {
    /// Creates a counter starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh id.
    pub fn next_id(&mut self) -> FrameId {
        let id = FrameId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.next
    }
}

/// Grid dimensions in engine axes (Y up).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameSize {
    /// Extent along X.
    pub width: u32,
    /// Extent along Y (up).
    pub height: u32,
    /// Extent along Z.
    pub depth: u32,
}

impl FrameSize {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Number of cells, computed without overflow.
    #[must_use]
    pub const fn volume(self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// Returns `[width, height, depth]`.
    #[must_use]
    pub const fn as_array(self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }

    /// Returns true if the coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: u32, y: u32, z: u32) -> bool {
        x < self.width && y < self.height && z < self.depth
    }
}

/// Opaque handle to a mesh owned by a render backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Mesh generated for a frame.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameMesh {
    /// Backend handle of the uploaded buffers.
    pub handle: MeshHandle,
    /// Number of vertices uploaded.
    pub vertex_count: usize,
    /// Number of 32-bit indices uploaded.
    pub index_count: usize,
}

/// One dense voxel grid.
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    size: FrameSize,
    colors: Vec<VoxColor>,
    /// Name inherited from the scene graph.
    pub name: Option<String>,
    /// World position accumulated from the scene graph.
    pub position: Option<[i32; 3]>,
    /// Rotation of the nearest transform ancestor.
    pub rotation: Option<Rotation>,
    /// True if an ancestor node is hidden.
    pub hidden: bool,
    mesh: Option<FrameMesh>,
    triangulated: bool,
}

impl Frame {
    /// Allocates a grid with every cell set to `fill`.
    ///
    /// A uniform fill is written as raw bytes in one pass.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(id: FrameId, size: FrameSize, fill: VoxColor) -> Self {
        let len = size.volume() as usize;
        let mut colors = vec![VoxColor::EMPTY; len];
        if fill.is_uniform() {
            bytemuck::cast_slice_mut::<VoxColor, u8>(&mut colors).fill(fill.r);
        } else {
            colors.fill(fill);
        }
        Self {
            id,
            size,
            colors,
            name: None,
            position: None,
            rotation: None,
            hidden: false,
            mesh: None,
            triangulated: false,
        }
    }

    /// Frame id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FrameId {
        self.id
    }

    /// Grid size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> FrameSize {
        self.size
    }

    /// Dense colors, `x + y*W + z*W*H`.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[VoxColor] {
        &self.colors
    }

    /// Mutable dense colors. Invalidates the generated mesh.
    #[inline]
    pub fn colors_mut(&mut self) -> &mut [VoxColor] {
        self.triangulated = false;
        &mut self.colors
    }

    /// Linear index of a cell, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if !self.size.contains(x, y, z) {
            return None;
        }
        let shape = RuntimeShape::<u32, 3>::new(self.size.as_array());
        Some(shape.linearize([x, y, z]) as usize)
    }

    /// Color at a cell, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<VoxColor> {
        self.index(x, y, z).map(|i| self.colors[i])
    }

    /// Sets a cell. Returns false outside the grid.
    pub fn set(&mut self, x: u32, y: u32, z: u32, color: VoxColor) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.colors[i] = color;
                self.triangulated = false;
                true
            }
            None => false,
        }
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.colors.iter().filter(|c| !c.is_empty()).count()
    }

    /// Generated mesh, if any.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> Option<&FrameMesh> {
        self.mesh.as_ref()
    }

    /// Removes the generated mesh so its backend can release it.
    pub fn take_mesh(&mut self) -> Option<FrameMesh> {
        self.triangulated = false;
        self.mesh.take()
    }

    /// Stores a freshly generated mesh and marks the frame triangulated.
    ///
    /// Returns the previous mesh, which the caller must release.
    pub fn install_mesh(&mut self, mesh: Option<FrameMesh>) -> Option<FrameMesh> {
        self.triangulated = true;
        std::mem::replace(&mut self.mesh, mesh)
    }

    /// True once a mesh matching the current colors has been generated.
    #[inline]
    #[must_use]
    pub const fn is_triangulated(&self) -> bool {
        self.triangulated
    }

    /// Deep copy of names and colors under a new id. Never copies the mesh.
    #[must_use]
    pub fn copy(&self, ids: &mut FrameIdCounter) -> Self {
        Self {
            id: ids.next_id(),
            size: self.size,
            colors: self.colors.clone(),
            name: self.name.clone(),
            position: self.position,
            rotation: self.rotation,
            hidden: self.hidden,
            mesh: None,
            triangulated: false,
        }
    }
}

/// Every frame produced by one import, plus its outcome.
#[derive(Debug, Default)]
pub struct FrameSet {
    frames: Vec<Frame>,
    is_valid: bool,
    triangulated: bool,
    last_error: Option<VoxError>,
    warnings: Vec<VoxWarning>,
}

impl FrameSet {
    /// Creates an empty, not yet valid set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new frame filled with `fill` and returns it.
    pub fn add_frame(
        &mut self,
        ids: &mut FrameIdCounter,
        size: FrameSize,
        fill: VoxColor,
    ) -> &mut Frame {
        self.frames.push(Frame::new(ids.next_id(), size, fill));
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// All frames in file order.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// All frames, mutable.
    #[inline]
    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Frame at `index`.
    #[inline]
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Mutable frame at `index`.
    #[inline]
    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    /// Number of frames.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if the set holds no frames.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True after a successful import.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Marks the import successful and clears any previous error.
    pub fn mark_valid(&mut self) {
        self.is_valid = true;
        self.last_error = None;
    }

    /// True once every frame has been triangulated.
    #[inline]
    #[must_use]
    pub const fn is_triangulated(&self) -> bool {
        self.triangulated
    }

    /// Sets the set-level triangulated flag.
    pub fn set_triangulated(&mut self, triangulated: bool) {
        self.triangulated = triangulated;
    }

    /// Error of the last failed operation.
    #[inline]
    #[must_use]
    pub const fn last_error(&self) -> Option<&VoxError> {
        self.last_error.as_ref()
    }

    /// Warnings collected during the last import.
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[VoxWarning] {
        &self.warnings
    }

    /// Records a recoverable condition.
    pub fn push_warning(&mut self, warning: VoxWarning) {
        self.warnings.push(warning);
    }

    /// Drops every frame and flag, returning meshes that still need releasing.
    pub fn reset(&mut self) -> Vec<FrameMesh> {
        let meshes = self.frames.iter_mut().filter_map(Frame::take_mesh).collect();
        self.frames = Vec::new();
        self.warnings.clear();
        self.is_valid = false;
        self.triangulated = false;
        self.last_error = None;
        meshes
    }

    /// Resets the set and records `error` as the outcome.
    ///
    /// Returns meshes that still need releasing.
    pub fn fail(&mut self, error: VoxError) -> Vec<FrameMesh> {
        let meshes = self.reset();
        self.last_error = Some(error);
        meshes
    }

    /// Deep copy of every frame. Meshes are not copied.
    #[must_use]
    pub fn copy(&self, ids: &mut FrameIdCounter) -> Self {
        Self {
            frames: self.frames.iter().map(|f| f.copy(ids)).collect(),
            is_valid: self.is_valid,
            triangulated: false,
            last_error: self.last_error.clone(),
            warnings: self.warnings.clone(),
        }
    }
}
