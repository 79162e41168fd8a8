//! # Scene Graph
//!
//! Decodes `nTRN` / `nGRP` / `nSHP` chunks into a flat node table and
//! resolves each shape's world position, name and visibility.
//!
//! ```text
//! nTRN (transform) ── child ──> nGRP (group) ── children ──> nTRN ──> nSHP (shape)
//! ```
//!
//! Nodes only store their children. Parents are recovered afterwards by
//! scanning children lists into an index table, so the graph never holds
//! back pointers.

use std::collections::HashMap;

use voxpipe_core::{ChunkId, FrameSet, ImportConfig, Rotation, VoxError, VoxResult, VoxWarning};

use crate::chunk::to_engine_axes;
use crate::cursor::ByteCursor;
use crate::dictionary::Dictionary;
use crate::report;

/// One animation frame of a transform node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformFrame {
    /// Animation frame index (`_f`).
    pub frame_index: u32,
    /// Decoded rotation (`_r`).
    pub rotation: Rotation,
    /// Translation in file axes (`_t`).
    pub translation: [i32; 3],
}

/// One model reference of a shape node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeModel {
    /// Index of the model, which is also the frame index.
    pub model_index: i32,
}

/// Node-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// `nTRN`: positions a single child.
    Transform {
        /// Per-frame transforms.
        frames: Vec<TransformFrame>,
    },
    /// `nGRP`: lists children.
    Group,
    /// `nSHP`: references models.
    Shape {
        /// Referenced models.
        models: Vec<ShapeModel>,
    },
}

/// A decoded scene node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneNode {
    /// Node id as stored in the file.
    pub id: i32,
    /// Node payload.
    pub kind: NodeKind,
    /// Child node ids.
    pub children: Vec<i32>,
    /// `_hidden` attribute.
    pub hidden: bool,
    /// `_name` attribute.
    pub name: Option<String>,
}

/// Flat node table in file order.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Nodes in file order.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Appends a node.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Decodes an `nTRN` payload.
    ///
    /// # Errors
    ///
    /// [`VoxError::CorruptValue`] if the payload is truncated or a count is negative.
    pub fn read_transform(
        &mut self,
        payload: &[u8],
        config: &ImportConfig,
        warnings: &mut Vec<VoxWarning>,
    ) -> VoxResult<()> {
        let chunk = ChunkId::TRANSFORM;
        let mut cursor = ByteCursor::new(payload);
        let (id, attributes) = read_node_header(&mut cursor, chunk)?;
        let child_id = cursor.read_i32().ok_or(truncated(chunk))?;
        let _reserved = cursor.read_i32().ok_or(truncated(chunk))?;
        let _layer_id = cursor.read_i32().ok_or(truncated(chunk))?;
        let count = cursor.read_count().ok_or(truncated(chunk))?;

        if count > config.max_node_frames {
            report(
                warnings,
                VoxWarning::TooManyFrames { node: id, count, limit: config.max_node_frames },
            );
        }

        let mut frames = Vec::with_capacity(count.min(config.max_node_frames));
        for position in 0..count {
            let dict = cursor.read_dictionary().ok_or(VoxError::CorruptValue {
                chunk,
                reason: "malformed frame dictionary",
            })?;
            if frames.len() < config.max_node_frames {
                frames.push(transform_frame(id, position, &dict, warnings));
            }
        }

        let (name, hidden) = node_attributes(id, &attributes, warnings);
        self.push(SceneNode {
            id,
            kind: NodeKind::Transform { frames },
            children: vec![child_id],
            hidden,
            name,
        });
        Ok(())
    }

    /// Decodes an `nGRP` payload.
    ///
    /// # Errors
    ///
    /// [`VoxError::CorruptValue`] if the payload is truncated or a count is negative.
    pub fn read_group(
        &mut self,
        payload: &[u8],
        config: &ImportConfig,
        warnings: &mut Vec<VoxWarning>,
    ) -> VoxResult<()> {
        let chunk = ChunkId::GROUP;
        let mut cursor = ByteCursor::new(payload);
        let (id, attributes) = read_node_header(&mut cursor, chunk)?;
        let count = cursor.read_count().ok_or(truncated(chunk))?;

        if count > config.max_node_children {
            report(
                warnings,
                VoxWarning::TooManyChildren { node: id, count, limit: config.max_node_children },
            );
        }

        let mut children = Vec::with_capacity(count.min(config.max_node_children));
        for _ in 0..count {
            let child = cursor.read_i32().ok_or(truncated(chunk))?;
            if children.len() < config.max_node_children {
                children.push(child);
            }
        }

        let (name, hidden) = node_attributes(id, &attributes, warnings);
        self.push(SceneNode { id, kind: NodeKind::Group, children, hidden, name });
        Ok(())
    }

    /// Decodes an `nSHP` payload.
    ///
    /// The model index is the frame index; `_f` in model attributes is ignored.
    ///
    /// # Errors
    ///
    /// [`VoxError::CorruptValue`] if the payload is truncated or a count is negative.
    pub fn read_shape(
        &mut self,
        payload: &[u8],
        config: &ImportConfig,
        warnings: &mut Vec<VoxWarning>,
    ) -> VoxResult<()> {
        let chunk = ChunkId::SHAPE;
        let mut cursor = ByteCursor::new(payload);
        let (id, attributes) = read_node_header(&mut cursor, chunk)?;
        let count = cursor.read_count().ok_or(truncated(chunk))?;

        if count > config.max_shape_models {
            report(
                warnings,
                VoxWarning::TooManyModels { node: id, count, limit: config.max_shape_models },
            );
        }

        let mut models = Vec::with_capacity(count.min(config.max_shape_models));
        for _ in 0..count {
            let model_index = cursor.read_i32().ok_or(truncated(chunk))?;
            cursor.read_dictionary().ok_or(VoxError::CorruptValue {
                chunk,
                reason: "malformed model dictionary",
            })?;
            if models.len() < config.max_shape_models {
                models.push(ShapeModel { model_index });
            }
        }

        let (name, hidden) = node_attributes(id, &attributes, warnings);
        self.push(SceneNode {
            id,
            kind: NodeKind::Shape { models },
            children: Vec::new(),
            hidden,
            name,
        });
        Ok(())
    }

    /// Parent index of every node, found by scanning children lists.
    ///
    /// A node listing itself as a child is not its own parent. When several
    /// nodes claim the same child, the first one in file order wins.
    #[must_use]
    pub fn parent_table(&self) -> Vec<Option<usize>> {
        let mut by_id: HashMap<i32, usize> = HashMap::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            by_id.entry(node.id).or_insert(index);
        }

        let mut parents = vec![None; self.nodes.len()];
        for (parent, node) in self.nodes.iter().enumerate() {
            for child_id in &node.children {
                let Some(&child) = by_id.get(child_id) else { continue };
                if child != parent && parents[child].is_none() {
                    parents[child] = Some(parent);
                }
            }
        }
        parents
    }

    /// Applies the hierarchy to every frame referenced by a shape node.
    ///
    /// For each shape, walks the ancestor chain accumulating the animation
    /// frame 0 translation of every transform (engine axes) into the frame's
    /// position, adopting the
    /// first ancestor name if the frame has none, the nearest transform's
    /// rotation, and any ancestor's hidden flag. Walks stop at a revisited
    /// node or after [`ImportConfig::max_scene_depth`] steps.
    pub fn resolve(
        &self,
        frames: &mut FrameSet,
        config: &ImportConfig,
        warnings: &mut Vec<VoxWarning>,
    ) {
        let parents = self.parent_table();
        // visited[i] == shape index + 1 when node i was seen in the current walk
        let mut visited = vec![0usize; self.nodes.len()];
        let frame_count = frames.len();

        for (shape_index, node) in self.nodes.iter().enumerate() {
            let NodeKind::Shape { models } = &node.kind else { continue };
            let Some(model) = models.first() else { continue };

            let index = usize::try_from(model.model_index).unwrap_or(usize::MAX);
            let Some(frame) = frames.frame_mut(index) else {
                report(
                    warnings,
                    VoxWarning::FrameIndexOutOfRange {
                        node: node.id,
                        index: model.model_index,
                        frames: frame_count,
                    },
                );
                continue;
            };

            let stamp = shape_index + 1;
            visited[shape_index] = stamp;
            let mut position = [0i32; 3];
            let mut rotation = None;
            let mut hidden = node.hidden;
            let mut steps = 0;
            let mut current = shape_index;

            while let Some(parent) = parents[current] {
                if visited[parent] == stamp || steps >= config.max_scene_depth {
                    report(warnings, VoxWarning::SceneCycle { node: node.id });
                    break;
                }
                visited[parent] = stamp;
                steps += 1;

                let ancestor = &self.nodes[parent];
                if let NodeKind::Transform { frames: keyframes } = &ancestor.kind {
                    if let Some(keyframe) = rest_frame(keyframes) {
                        let t = to_engine_axes(keyframe.translation);
                        for (axis, offset) in position.iter_mut().zip(t) {
                            *axis = axis.wrapping_add(offset);
                        }
                        rotation.get_or_insert(keyframe.rotation);
                    }
                }
                if frame.name.is_none() {
                    frame.name.clone_from(&ancestor.name);
                }
                hidden |= ancestor.hidden;
                current = parent;
            }

            frame.position = Some(position);
            frame.rotation = rotation;
            frame.hidden = hidden;
        }
    }
}

/// The keyframe of animation frame 0, else the first one listed.
fn rest_frame(keyframes: &[TransformFrame]) -> Option<&TransformFrame> {
    keyframes
        .iter()
        .find(|keyframe| keyframe.frame_index == 0)
        .or_else(|| keyframes.first())
}

fn truncated(chunk: ChunkId) -> VoxError {
    VoxError::CorruptValue { chunk, reason: "truncated node payload" }
}

fn read_node_header(cursor: &mut ByteCursor<'_>, chunk: ChunkId) -> VoxResult<(i32, Dictionary)> {
    let id = cursor.read_i32().ok_or(truncated(chunk))?;
    let attributes = cursor.read_dictionary().ok_or(VoxError::CorruptValue {
        chunk,
        reason: "malformed node attributes",
    })?;
    Ok((id, attributes))
}

/// Extracts `_name` and `_hidden`. Unparsable values are ignored with a warning.
fn node_attributes(
    node: i32,
    attributes: &Dictionary,
    warnings: &mut Vec<VoxWarning>,
) -> (Option<String>, bool) {
    let name = attributes
        .get("_name")
        .filter(|name| !name.is_empty())
        .map(str::to_owned);

    let hidden = match attributes.get("_hidden") {
        None | Some("0") => false,
        Some("1") => true,
        Some(value) => {
            report(warnings, bad_attribute(node, "_hidden", value));
            false
        }
    };
    (name, hidden)
}

fn transform_frame(
    node: i32,
    position: usize,
    dict: &Dictionary,
    warnings: &mut Vec<VoxWarning>,
) -> TransformFrame {
    let default_index = u32::try_from(position).unwrap_or(u32::MAX);
    let frame_index = match dict.get("_f") {
        None => default_index,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            report(warnings, bad_attribute(node, "_f", value));
            default_index
        }),
    };

    let rotation = match dict.get("_r") {
        None => Rotation::IDENTITY,
        Some(value) => match value.trim().parse::<u8>() {
            Ok(code) => Rotation::from_packed(code).unwrap_or_else(|| {
                report(warnings, VoxWarning::BadRotation { node, code });
                Rotation::IDENTITY
            }),
            Err(_) => {
                report(warnings, bad_attribute(node, "_r", value));
                Rotation::IDENTITY
            }
        },
    };

    let translation = match dict.get("_t") {
        None => [0; 3],
        Some(value) => parse_translation(value).unwrap_or_else(|| {
            report(warnings, bad_attribute(node, "_t", value));
            [0; 3]
        }),
    };

    TransformFrame { frame_index, rotation, translation }
}

/// Parses three space-separated integers.
fn parse_translation(value: &str) -> Option<[i32; 3]> {
    let mut parts = value.split_whitespace().map(str::parse::<i32>);
    let t = [parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?];
    parts.next().is_none().then_some(t)
}

fn bad_attribute(node: i32, key: &str, value: &str) -> VoxWarning {
    VoxWarning::BadAttribute { node, key: key.to_owned(), value: value.to_owned() }
}
