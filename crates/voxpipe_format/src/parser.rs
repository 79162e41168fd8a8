//! # Chunk-Stream Parser
//!
//! Walks the chunk stream once, keeping a stack of the children regions it
//! is currently inside. Every chunk body is decoded through a [`ByteCursor`]
//! restricted to its own payload.
//!
//! Voxels read before the palette are staged as [`VoxelSlot`]s and collapsed
//! into plain colors as soon as the `RGBA` chunk (or the fallback palette)
//! is known, so the order of `XYZI` and `RGBA` never changes the result.

use voxpipe_core::{
    ChunkId, FrameIdCounter, FrameSet, FrameSize, ImportConfig, Palette, VoxColor, VoxError,
    VoxResult, VoxWarning,
};

use crate::chunk::{
    to_engine_axes, ChunkHeader, CHUNK_HEADER_LEN, FILE_HEADER_LEN, SUPPORTED_VERSIONS, VOX_MAGIC,
};
use crate::cursor::ByteCursor;
use crate::report;
use crate::scene::SceneGraph;

/// Voxel color before the palette is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VoxelSlot {
    /// 1-based palette index awaiting `RGBA`.
    Unresolved(u8),
    /// Final color.
    Resolved(VoxColor),
    /// Resolved to a transparent palette entry.
    Empty,
}

impl VoxelSlot {
    fn new(color_index: u8, palette: Option<&Palette>) -> Self {
        match palette {
            Some(palette) => Self::from_color(palette.lookup(color_index)),
            None => Self::Unresolved(color_index),
        }
    }

    fn from_color(color: VoxColor) -> Self {
        if color.is_empty() {
            Self::Empty
        } else {
            Self::Resolved(color)
        }
    }

    fn resolve(self, palette: &Palette) -> Self {
        match self {
            Self::Unresolved(index) => Self::from_color(palette.lookup(index)),
            resolved => resolved,
        }
    }

    fn color(self) -> Option<VoxColor> {
        match self {
            Self::Resolved(color) => Some(color),
            Self::Empty => Some(VoxColor::EMPTY),
            Self::Unresolved(_) => None,
        }
    }
}

/// Sparse voxels of one frame that still need a palette.
#[derive(Debug)]
struct StagedFrame {
    frame: usize,
    slots: Vec<(usize, VoxelSlot)>,
}

/// Output of a successful parse.
#[derive(Debug)]
pub struct ParsedFile {
    /// Frames with final colors, positions not yet resolved.
    pub frames: FrameSet,
    /// Scene nodes in file order.
    pub scene: SceneGraph,
}

/// Parse state for one input buffer.
pub struct ChunkParser<'a> {
    config: &'a ImportConfig,
    ids: &'a mut FrameIdCounter,
    warnings: &'a mut Vec<VoxWarning>,
    frames: FrameSet,
    scene: SceneGraph,
    palette: Option<Palette>,
    pending_size: Option<FrameSize>,
    staged: Vec<StagedFrame>,
    voxel_budget: u64,
    seen_main: bool,
}

impl<'a> ChunkParser<'a> {
    /// Creates a parser. Frame ids are drawn from `ids`; warnings are appended
    /// to `warnings` as they are found.
    pub fn new(
        config: &'a ImportConfig,
        ids: &'a mut FrameIdCounter,
        warnings: &'a mut Vec<VoxWarning>,
    ) -> Self {
        Self {
            config,
            ids,
            warnings,
            frames: FrameSet::new(),
            scene: SceneGraph::default(),
            palette: None,
            pending_size: None,
            staged: Vec::new(),
            voxel_budget: config.max_total_voxels,
            seen_main: false,
        }
    }

    /// Decodes `data` into frames and a scene node table.
    ///
    /// # Errors
    ///
    /// Returns the first fatal condition found. Everything allocated so far is
    /// dropped with the parser.
    pub fn parse(mut self, data: &[u8]) -> VoxResult<ParsedFile> {
        if data.is_empty() {
            return Err(VoxError::EmptyFile);
        }
        let prefix = &data[..data.len().min(VOX_MAGIC.len())];
        if !VOX_MAGIC.starts_with(prefix) {
            let mut found = [0u8; 4];
            found[..prefix.len()].copy_from_slice(prefix);
            return Err(VoxError::InvalidFilePrefix { found: ChunkId(found) });
        }
        let required = FILE_HEADER_LEN + CHUNK_HEADER_LEN;
        let too_small = VoxError::TooSmall { len: data.len(), required };
        if data.len() < required {
            return Err(too_small);
        }

        let mut cursor = ByteCursor::new(data);
        cursor.skip(VOX_MAGIC.len()).ok_or_else(|| too_small.clone())?;
        let version = cursor.read_u32().ok_or(too_small)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            report(self.warnings, VoxWarning::UnsupportedVersion(version));
        }

        // End offsets of the children regions we are inside.
        let mut stack: Vec<usize> = Vec::with_capacity(self.config.max_chunk_depth);

        loop {
            while stack.last().is_some_and(|&end| end <= cursor.position()) {
                stack.pop();
            }
            if cursor.is_empty() {
                break;
            }

            let offset = cursor.position();
            let limit = stack.last().copied().unwrap_or(data.len());
            let header = ChunkHeader::read(&mut cursor).ok_or(VoxError::MissingHeader { offset })?;

            if header.id == ChunkId::MAIN {
                self.read_main(&header, cursor.remaining())?;
                stack.push(data.len());
                continue;
            }
            if !self.seen_main {
                return Err(VoxError::WrongFirstItem { found: header.id });
            }

            // header and body must both fit inside the enclosing region
            let available = limit.saturating_sub(offset) as u64;
            let requested = CHUNK_HEADER_LEN as u64 + header.body_len();
            if requested > available {
                return Err(VoxError::TooLarge { chunk: header.id, requested, available });
            }

            let data_size = header.data_size as usize;
            let children_size = header.children_size as usize;
            let payload = cursor.read_bytes(data_size).ok_or(VoxError::CorruptValue {
                chunk: header.id,
                reason: "payload runs past end of file",
            })?;

            if !self.dispatch(header.id, payload)? {
                report(self.warnings, VoxWarning::UnknownChunk(header.id));
                cursor.skip(children_size).ok_or(VoxError::CorruptValue {
                    chunk: header.id,
                    reason: "children run past end of file",
                })?;
                continue;
            }

            if children_size > 0 {
                if stack.len() >= self.config.max_chunk_depth {
                    return Err(VoxError::TooDeep {
                        depth: stack.len() + 1,
                        max: self.config.max_chunk_depth,
                    });
                }
                stack.push(cursor.position() + children_size);
            }
        }

        self.finish()
    }

    fn read_main(&mut self, header: &ChunkHeader, remaining: usize) -> VoxResult<()> {
        if self.seen_main {
            return Err(VoxError::DuplicateItem { chunk: ChunkId::MAIN });
        }
        if header.data_size != 0 {
            return Err(VoxError::InvalidSize {
                chunk: ChunkId::MAIN,
                reason: "MAIN must not carry a payload",
            });
        }
        if header.children_size as usize != remaining {
            return Err(VoxError::InvalidSize {
                chunk: ChunkId::MAIN,
                reason: "MAIN children must span the rest of the file",
            });
        }
        self.seen_main = true;
        Ok(())
    }

    /// Decodes one known chunk. Returns false for unknown ids.
    fn dispatch(&mut self, id: ChunkId, payload: &[u8]) -> VoxResult<bool> {
        tracing::debug!(chunk = %id, len = payload.len(), "chunk");
        match id {
            ChunkId::SIZE => self.read_size(payload)?,
            ChunkId::XYZI => self.read_voxels(payload)?,
            ChunkId::RGBA => self.read_palette(payload)?,
            ChunkId::TRANSFORM => self.scene.read_transform(payload, self.config, self.warnings)?,
            ChunkId::GROUP => self.scene.read_group(payload, self.config, self.warnings)?,
            ChunkId::SHAPE => self.scene.read_shape(payload, self.config, self.warnings)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn read_size(&mut self, payload: &[u8]) -> VoxResult<()> {
        let chunk = ChunkId::SIZE;
        if self.pending_size.is_some() {
            return Err(VoxError::DuplicateItem { chunk });
        }

        let mut cursor = ByteCursor::new(payload);
        let mut dims = [0u32; 3];
        for dim in &mut dims {
            *dim = cursor.read_u32().ok_or(VoxError::CorruptValue {
                chunk,
                reason: "truncated model size",
            })?;
        }
        if dims.contains(&0) {
            return Err(VoxError::InvalidSize { chunk, reason: "zero dimension" });
        }

        let [width, height, depth] = to_engine_axes(dims);
        let size = FrameSize::new(width, height, depth);
        if size.volume() > self.config.max_frame_voxels {
            return Err(VoxError::TooLarge {
                chunk,
                requested: size.volume(),
                available: self.config.max_frame_voxels,
            });
        }
        if size.volume() > self.voxel_budget {
            return Err(VoxError::TooLarge {
                chunk,
                requested: size.volume(),
                available: self.voxel_budget,
            });
        }
        self.pending_size = Some(size);
        Ok(())
    }

    fn read_voxels(&mut self, payload: &[u8]) -> VoxResult<()> {
        let chunk = ChunkId::XYZI;
        let size = self.pending_size.take().ok_or(VoxError::MissingSize)?;

        let mut cursor = ByteCursor::new(payload);
        let count = cursor.read_u32().ok_or(VoxError::CorruptValue {
            chunk,
            reason: "truncated voxel count",
        })?;
        let count = u64::from(count);
        if count > size.volume() {
            return Err(VoxError::TooLarge { chunk, requested: count, available: size.volume() });
        }
        let available = cursor.remaining() as u64 / 4;
        if count > available {
            return Err(VoxError::TooLarge { chunk, requested: count, available });
        }

        self.voxel_budget = self.voxel_budget.saturating_sub(size.volume());
        let frame_index = self.frames.len();
        let frame = self.frames.add_frame(self.ids, size, VoxColor::EMPTY);
        #[allow(clippy::cast_possible_truncation)]
        let mut slots = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let Some([fx, fy, fz, color_index]) = cursor.read_array::<4>() else {
                return Err(VoxError::CorruptValue { chunk, reason: "truncated voxel record" });
            };
            let [x, y, z] = to_engine_axes([u32::from(fx), u32::from(fy), u32::from(fz)]);
            let index = frame.index(x, y, z).ok_or(VoxError::IndexOutOfBounds {
                x,
                y,
                z,
                size: size.as_array(),
            })?;
            slots.push((index, VoxelSlot::new(color_index, self.palette.as_ref())));
        }

        let staged = StagedFrame { frame: frame_index, slots };
        match &self.palette {
            Some(palette) => collapse(&mut self.frames, staged, palette),
            None => self.staged.push(staged),
        }
        Ok(())
    }

    fn read_palette(&mut self, payload: &[u8]) -> VoxResult<()> {
        let chunk = ChunkId::RGBA;
        if self.palette.is_some() {
            return Err(VoxError::DuplicateItem { chunk });
        }
        let palette = Palette::from_rgba_bytes(payload).ok_or(VoxError::InvalidSize {
            chunk,
            reason: "palette must be exactly 1024 bytes",
        })?;
        self.resolve_staged(&palette);
        self.palette = Some(palette);
        Ok(())
    }

    fn resolve_staged(&mut self, palette: &Palette) {
        for staged in std::mem::take(&mut self.staged) {
            collapse(&mut self.frames, staged, palette);
        }
    }

    fn finish(mut self) -> VoxResult<ParsedFile> {
        if self.frames.is_empty() {
            return Err(VoxError::MissingDataChunks);
        }
        if self.palette.is_none() {
            if self.config.require_palette {
                return Err(VoxError::MissingFormatChunk);
            }
            report(self.warnings, VoxWarning::MissingPalette);
            self.resolve_staged(&Palette::default());
        }
        Ok(ParsedFile { frames: self.frames, scene: self.scene })
    }
}

/// Writes staged voxels into their frame.
fn collapse(frames: &mut FrameSet, staged: StagedFrame, palette: &Palette) {
    let Some(frame) = frames.frame_mut(staged.frame) else { return };
    let colors = frame.colors_mut();
    for (index, slot) in staged.slots {
        if let Some(color) = slot.resolve(palette).color() {
            colors[index] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &[u8; 4], payload: &[u8], children: &[u8]) -> Vec<u8> {
        let mut out = id.to_vec();
        out.extend(u32::try_from(payload.len()).unwrap().to_le_bytes());
        out.extend(u32::try_from(children.len()).unwrap().to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(children);
        out
    }

    fn file(children: &[u8]) -> Vec<u8> {
        let mut out = b"VOX ".to_vec();
        out.extend(150u32.to_le_bytes());
        out.extend(chunk(b"MAIN", &[], children));
        out
    }

    fn size(x: u32, y: u32, z: u32) -> Vec<u8> {
        let payload: Vec<u8> = [x, y, z].iter().flat_map(|v| v.to_le_bytes()).collect();
        chunk(b"SIZE", &payload, &[])
    }

    fn xyzi(voxels: &[[u8; 4]]) -> Vec<u8> {
        let mut payload = u32::try_from(voxels.len()).unwrap().to_le_bytes().to_vec();
        for v in voxels {
            payload.extend_from_slice(v);
        }
        chunk(b"XYZI", &payload, &[])
    }

    fn rgba(first: [u8; 4]) -> Vec<u8> {
        let mut payload = vec![0u8; 1024];
        payload[..4].copy_from_slice(&first);
        chunk(b"RGBA", &payload, &[])
    }

    fn parse_with(
        data: &[u8],
        config: &ImportConfig,
    ) -> (VoxResult<ParsedFile>, Vec<VoxWarning>) {
        let mut ids = FrameIdCounter::new();
        let mut warnings = Vec::new();
        let result = ChunkParser::new(config, &mut ids, &mut warnings).parse(data);
        (result, warnings)
    }

    fn parse(data: &[u8]) -> (VoxResult<ParsedFile>, Vec<VoxWarning>) {
        parse_with(data, &ImportConfig::default())
    }

    #[test]
    fn test_slot_resolution() {
        let mut palette = Palette::default();
        assert_eq!(VoxelSlot::new(3, None), VoxelSlot::Unresolved(3));
        assert_eq!(VoxelSlot::Unresolved(3).color(), None);
        assert_eq!(
            VoxelSlot::new(1, Some(&palette)),
            VoxelSlot::Resolved(palette.lookup(1))
        );

        palette = Palette::from_rgba_bytes(&[0u8; 1024]).unwrap();
        assert_eq!(VoxelSlot::Unresolved(1).resolve(&palette), VoxelSlot::Empty);
        assert_eq!(VoxelSlot::Empty.color(), Some(VoxColor::EMPTY));
    }

    #[test]
    fn test_empty_and_small_inputs() {
        assert_eq!(parse(&[]).0.unwrap_err(), VoxError::EmptyFile);
        assert!(matches!(parse(b"VOX ").0.unwrap_err(), VoxError::TooSmall { len: 4, .. }));
    }

    #[test]
    fn test_short_foreign_input_is_invalid_prefix() {
        let err = parse(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").0.unwrap_err();
        assert_eq!(err, VoxError::InvalidFilePrefix { found: ChunkId(*b"\x89PNG") });

        let err = parse(b"PK").0.unwrap_err();
        assert_eq!(err, VoxError::InvalidFilePrefix { found: ChunkId(*b"PK\0\0") });
        assert!(matches!(parse(b"VO").0.unwrap_err(), VoxError::TooSmall { len: 2, .. }));
    }

    #[test]
    fn test_invalid_prefix() {
        let mut data = file(&[]);
        data[..4].copy_from_slice(b"RIFF");
        let err = parse(&data).0.unwrap_err();
        assert_eq!(err, VoxError::InvalidFilePrefix { found: ChunkId(*b"RIFF") });
    }

    #[test]
    fn test_version_mismatch_warns() {
        let mut data = file(&[size(1, 1, 1), xyzi(&[[0, 0, 0, 1]]), rgba([9, 9, 9, 255])].concat());
        data[4..8].copy_from_slice(&151u32.to_le_bytes());
        let (result, warnings) = parse(&data);
        assert!(result.is_ok());
        assert_eq!(warnings, vec![VoxWarning::UnsupportedVersion(151)]);
    }

    #[test]
    fn test_wrong_first_item() {
        let mut data = b"VOX ".to_vec();
        data.extend(150u32.to_le_bytes());
        data.extend(size(1, 1, 1));
        let err = parse(&data).0.unwrap_err();
        assert_eq!(err, VoxError::WrongFirstItem { found: ChunkId::SIZE });
    }

    #[test]
    fn test_main_must_span_file() {
        let mut data = file(&size(1, 1, 1));
        data.push(0);
        assert!(matches!(
            parse(&data).0.unwrap_err(),
            VoxError::InvalidSize { chunk: ChunkId::MAIN, .. }
        ));
    }

    #[test]
    fn test_duplicate_main() {
        let data = file(&chunk(b"MAIN", &[], &[]));
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::DuplicateItem { chunk: ChunkId::MAIN });
    }

    #[test]
    fn test_main_with_payload_rejected() {
        let mut data = b"VOX ".to_vec();
        data.extend(150u32.to_le_bytes());
        data.extend(chunk(b"MAIN", &[0; 4], &[]));
        assert!(matches!(
            parse(&data).0.unwrap_err(),
            VoxError::InvalidSize { chunk: ChunkId::MAIN, .. }
        ));
    }

    #[test]
    fn test_duplicate_size() {
        let data = file(&[size(1, 1, 1), size(1, 1, 1)].concat());
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::DuplicateItem { chunk: ChunkId::SIZE });
    }

    #[test]
    fn test_zero_dimension() {
        let data = file(&size(0, 4, 4));
        assert!(matches!(parse(&data).0.unwrap_err(), VoxError::InvalidSize { .. }));
    }

    #[test]
    fn test_oversized_model() {
        let config = ImportConfig { max_frame_voxels: 8, ..ImportConfig::default() };
        let data = file(&size(3, 3, 3));
        assert!(matches!(
            parse_with(&data, &config).0.unwrap_err(),
            VoxError::TooLarge { requested: 27, available: 8, .. }
        ));
    }

    #[test]
    fn test_total_voxel_budget() {
        let config = ImportConfig {
            max_frame_voxels: 8,
            max_total_voxels: 16,
            ..ImportConfig::default()
        };
        let model = [size(2, 2, 2), xyzi(&[])].concat();
        let two = file(&[model.clone(), model.clone(), rgba([1, 1, 1, 255])].concat());
        assert_eq!(parse_with(&two, &config).0.unwrap().frames.len(), 2);

        // the third grid is refused at SIZE, before it is allocated
        let three = file(&[model.clone(), model.clone(), model, rgba([1, 1, 1, 255])].concat());
        assert_eq!(
            parse_with(&three, &config).0.unwrap_err(),
            VoxError::TooLarge { chunk: ChunkId::SIZE, requested: 8, available: 0 }
        );
    }

    #[test]
    fn test_missing_size() {
        let data = file(&xyzi(&[[0, 0, 0, 1]]));
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::MissingSize);
    }

    #[test]
    fn test_voxel_count_exceeds_volume() {
        let data = file(&[size(1, 1, 1), xyzi(&[[0, 0, 0, 1], [0, 0, 0, 2]])].concat());
        assert!(matches!(
            parse(&data).0.unwrap_err(),
            VoxError::TooLarge { chunk: ChunkId::XYZI, requested: 2, available: 1 }
        ));
    }

    #[test]
    fn test_voxel_count_exceeds_payload() {
        let mut payload = 2u32.to_le_bytes().to_vec();
        payload.extend([0, 0, 0, 1]);
        let data = file(&[size(2, 2, 2), chunk(b"XYZI", &payload, &[])].concat());
        assert!(matches!(
            parse(&data).0.unwrap_err(),
            VoxError::TooLarge { chunk: ChunkId::XYZI, requested: 2, available: 1 }
        ));
    }

    #[test]
    fn test_out_of_bounds_voxel() {
        // file z = 2 becomes engine y = 2, outside height 2
        let data = file(&[size(2, 2, 2), xyzi(&[[0, 0, 2, 1]]), rgba([1, 1, 1, 255])].concat());
        assert_eq!(
            parse(&data).0.unwrap_err(),
            VoxError::IndexOutOfBounds { x: 0, y: 2, z: 0, size: [2, 2, 2] }
        );
    }

    #[test]
    fn test_axis_swap_applied() {
        let data =
            file(&[size(1, 2, 3), xyzi(&[[0, 1, 2, 1]]), rgba([10, 20, 30, 255])].concat());
        let parsed = parse(&data).0.unwrap();
        let frame = &parsed.frames.frames()[0];
        assert_eq!(frame.size().as_array(), [1, 3, 2]);
        assert_eq!(frame.get(0, 2, 1), Some(VoxColor::new(10, 20, 30, 255)));
        assert_eq!(frame.solid_count(), 1);
    }

    #[test]
    fn test_palette_before_and_after_voxels() {
        let voxels = xyzi(&[[0, 0, 0, 1], [1, 0, 0, 1]]);
        let palette = rgba([200, 100, 50, 255]);
        let before = file(&[palette.clone(), size(2, 1, 1), voxels.clone()].concat());
        let after = file(&[size(2, 1, 1), voxels, palette].concat());

        let before = parse(&before).0.unwrap();
        let after = parse(&after).0.unwrap();
        assert_eq!(before.frames.frames()[0].colors(), after.frames.frames()[0].colors());
        assert_eq!(before.frames.frames()[0].solid_count(), 2);
    }

    #[test]
    fn test_transparent_palette_entry_stays_empty() {
        let data = file(&[size(1, 1, 1), xyzi(&[[0, 0, 0, 2]]), rgba([1, 1, 1, 255])].concat());
        let parsed = parse(&data).0.unwrap();
        assert_eq!(parsed.frames.frames()[0].solid_count(), 0);
    }

    #[test]
    fn test_duplicate_palette() {
        let data = file(&[rgba([0; 4]), rgba([0; 4])].concat());
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::DuplicateItem { chunk: ChunkId::RGBA });
    }

    #[test]
    fn test_short_palette() {
        let data = file(&chunk(b"RGBA", &[0; 1020], &[]));
        assert!(matches!(
            parse(&data).0.unwrap_err(),
            VoxError::InvalidSize { chunk: ChunkId::RGBA, .. }
        ));
    }

    #[test]
    fn test_missing_chunks() {
        assert_eq!(parse(&file(&rgba([0; 4]))).0.unwrap_err(), VoxError::MissingDataChunks);
        let data = file(&[size(1, 1, 1), xyzi(&[[0, 0, 0, 1]])].concat());
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::MissingFormatChunk);
    }

    #[test]
    fn test_default_palette_fallback() {
        let config = ImportConfig { require_palette: false, ..ImportConfig::default() };
        let data = file(&[size(1, 1, 1), xyzi(&[[0, 0, 0, 1]])].concat());
        let (result, warnings) = parse_with(&data, &config);
        let parsed = result.unwrap();
        assert_eq!(warnings, vec![VoxWarning::MissingPalette]);
        assert_eq!(parsed.frames.frames()[0].get(0, 0, 0), Some(Palette::default().lookup(1)));
    }

    #[test]
    fn test_unknown_chunk_skipped() {
        let unknown = chunk(b"MATL", &[1, 2, 3], &chunk(b"SIZE", &[0; 12], &[]));
        let data =
            file(&[unknown, size(1, 1, 1), xyzi(&[[0, 0, 0, 1]]), rgba([5, 5, 5, 255])].concat());
        let (result, warnings) = parse(&data);
        assert_eq!(result.unwrap().frames.len(), 1);
        assert_eq!(warnings, vec![VoxWarning::UnknownChunk(ChunkId(*b"MATL"))]);
    }

    #[test]
    fn test_truncated_header() {
        let mut data = file(&[]);
        data.extend_from_slice(b"SIZE\0\0");
        // patch MAIN children to cover the partial header
        data[16..20].copy_from_slice(&6u32.to_le_bytes());
        assert_eq!(parse(&data).0.unwrap_err(), VoxError::MissingHeader { offset: 20 });
    }

    #[test]
    fn test_chunk_larger_than_parent() {
        let data = file(&chunk(b"SIZE", &[0; 12], &[])[..16]);
        assert!(matches!(parse(&data).0.unwrap_err(), VoxError::TooLarge { .. }));
    }

    #[test]
    fn test_child_header_crossing_parent_region() {
        let mut parent = b"RGBA".to_vec();
        parent.extend(1024u32.to_le_bytes());
        parent.extend(4u32.to_le_bytes());
        parent.extend([0u8; 1024]);
        parent.extend(chunk(b"ABCD", &[], &[]));

        let (result, warnings) = parse(&file(&parent));
        assert_eq!(
            result.unwrap_err(),
            VoxError::TooLarge { chunk: ChunkId(*b"ABCD"), requested: 12, available: 4 }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_nesting_limit() {
        let config = ImportConfig { max_chunk_depth: 2, ..ImportConfig::default() };
        let inner = chunk(b"SIZE", &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0], &size(1, 1, 1));
        let data = file(&chunk(b"RGBA", &[0; 1024], &inner));
        assert_eq!(
            parse_with(&data, &config).0.unwrap_err(),
            VoxError::TooDeep { depth: 3, max: 2 }
        );
    }

    #[test]
    fn test_trailing_payload_ignored() {
        let mut payload: Vec<u8> = [1u32, 1, 1].iter().flat_map(|v| v.to_le_bytes()).collect();
        payload.extend([0xEE; 5]);
        let data = file(
            &[chunk(b"SIZE", &payload, &[]), xyzi(&[[0, 0, 0, 1]]), rgba([3, 3, 3, 255])]
                .concat(),
        );
        assert_eq!(parse(&data).0.unwrap().frames.frames()[0].solid_count(), 1);
    }
}
