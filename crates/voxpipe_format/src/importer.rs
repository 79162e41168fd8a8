//! # Importer Context
//!
//! [`VoxImporter`] owns the import limits and the frame id counter, so ids
//! stay unique across every set it produces or copies.

use voxpipe_core::{
    Frame, FrameIdCounter, FrameSet, FrameSize, ImportConfig, VoxColor, VoxResult,
};

use crate::parser::{ChunkParser, ParsedFile};

/// Long-lived import context.
#[derive(Debug)]
pub struct VoxImporter {
    config: ImportConfig,
    ids: FrameIdCounter,
}

impl Default for VoxImporter {
    fn default() -> Self {
        Self {
            config: ImportConfig::default(),
            ids: FrameIdCounter::new(),
        }
    }
}

impl VoxImporter {
    /// Creates an importer after validating `config`.
    ///
    /// # Errors
    ///
    /// [`VoxError::InvalidConfig`](voxpipe_core::VoxError::InvalidConfig) if a limit is out of
    /// range.
    pub fn new(config: ImportConfig) -> VoxResult<Self> {
        config.validate()?;
        Ok(Self { config, ids: FrameIdCounter::new() })
    }

    /// Import limits in effect.
    #[must_use]
    pub const fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Number of frame ids issued so far.
    #[must_use]
    pub const fn frames_issued(&self) -> u32 {
        self.ids.issued()
    }

    /// Parses `data` and resolves the scene graph.
    ///
    /// Warnings are stored in the returned set. A failure is logged once with
    /// its error code.
    ///
    /// # Errors
    ///
    /// The first fatal condition found while parsing.
    pub fn parse(&mut self, data: &[u8]) -> VoxResult<FrameSet> {
        self.parse_frames(data).map_err(|err| {
            tracing::error!(code = err.code(), "vox import failed: {err}");
            err
        })
    }

    fn parse_frames(&mut self, data: &[u8]) -> VoxResult<FrameSet> {
        let mut warnings = Vec::new();
        let ParsedFile { mut frames, scene } =
            ChunkParser::new(&self.config, &mut self.ids, &mut warnings).parse(data)?;
        scene.resolve(&mut frames, &self.config, &mut warnings);

        for warning in warnings {
            frames.push_warning(warning);
        }
        frames.mark_valid();
        tracing::debug!(
            frames = frames.len(),
            nodes = scene.nodes().len(),
            warnings = frames.warnings().len(),
            "vox import complete"
        );
        Ok(frames)
    }

    /// Parses `data` into a set that is always returned.
    ///
    /// On failure the set is empty, not valid, and carries the error in
    /// [`FrameSet::last_error`].
    pub fn import(&mut self, data: &[u8]) -> FrameSet {
        match self.parse(data) {
            Ok(frames) => frames,
            Err(err) => {
                let mut frames = FrameSet::new();
                let meshes = frames.fail(err);
                debug_assert!(meshes.is_empty());
                frames
            }
        }
    }

    /// Appends a frame with a fresh id.
    pub fn add_frame<'s>(
        &mut self,
        set: &'s mut FrameSet,
        size: FrameSize,
        fill: VoxColor,
    ) -> &'s mut Frame {
        set.add_frame(&mut self.ids, size, fill)
    }

    /// Deep copy of a frame under a fresh id. The mesh is not copied.
    #[must_use]
    pub fn copy_frame(&mut self, frame: &Frame) -> Frame {
        frame.copy(&mut self.ids)
    }

    /// Deep copy of a set with fresh ids. The copy is never triangulated.
    #[must_use]
    pub fn copy_frame_set(&mut self, set: &FrameSet) -> FrameSet {
        set.copy(&mut self.ids)
    }
}
