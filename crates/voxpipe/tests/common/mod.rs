//! Synthetic `.vox` writer for scenario tests.

#![allow(dead_code)]

/// Encodes one chunk.
pub fn chunk(id: &[u8; 4], payload: &[u8], children: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend(u32::try_from(payload.len()).unwrap().to_le_bytes());
    out.extend(u32::try_from(children.len()).unwrap().to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(children);
    out
}

fn string(out: &mut Vec<u8>, s: &str) {
    out.extend(i32::try_from(s.len()).unwrap().to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn dictionary(out: &mut Vec<u8>, entries: &[(&str, &str)]) {
    out.extend(i32::try_from(entries.len()).unwrap().to_le_bytes());
    for (key, value) in entries {
        string(out, key);
        string(out, value);
    }
}

/// Builds a file chunk by chunk. Everything lands inside `MAIN`.
#[derive(Clone, Debug)]
pub struct VoxBuilder {
    version: u32,
    children: Vec<u8>,
}

impl Default for VoxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxBuilder {
    pub fn new() -> Self {
        Self { version: 150, children: Vec::new() }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn chunk(mut self, id: &[u8; 4], payload: &[u8], children: &[u8]) -> Self {
        self.children.extend(chunk(id, payload, children));
        self
    }

    /// `SIZE` in file axes (Z up).
    pub fn size(self, x: u32, y: u32, z: u32) -> Self {
        let payload: Vec<u8> = [x, y, z].iter().flat_map(|v| v.to_le_bytes()).collect();
        self.chunk(b"SIZE", &payload, &[])
    }

    /// `XYZI` records `[x, y, z, color_index]` in file axes.
    pub fn voxels(self, voxels: &[[u8; 4]]) -> Self {
        let mut payload = u32::try_from(voxels.len()).unwrap().to_le_bytes().to_vec();
        for voxel in voxels {
            payload.extend_from_slice(voxel);
        }
        self.chunk(b"XYZI", &payload, &[])
    }

    /// `RGBA` with every entry opaque grey except the listed 1-based indices.
    pub fn palette(self, colors: &[(u8, [u8; 4])]) -> Self {
        let mut payload = [128u8, 128, 128, 255].repeat(256);
        for &(index, rgba) in colors {
            let entry = usize::from(index.wrapping_sub(1)) * 4;
            payload[entry..entry + 4].copy_from_slice(&rgba);
        }
        self.chunk(b"RGBA", &payload, &[])
    }

    /// `nTRN` with a single animation frame.
    pub fn transform(
        self,
        id: i32,
        attributes: &[(&str, &str)],
        child: i32,
        frame: &[(&str, &str)],
    ) -> Self {
        self.animated_transform(id, attributes, child, &[frame])
    }

    /// `nTRN` with one dictionary per animation frame.
    pub fn animated_transform(
        self,
        id: i32,
        attributes: &[(&str, &str)],
        child: i32,
        frames: &[&[(&str, &str)]],
    ) -> Self {
        let mut payload = id.to_le_bytes().to_vec();
        dictionary(&mut payload, attributes);
        payload.extend(child.to_le_bytes());
        payload.extend((-1i32).to_le_bytes());
        payload.extend(0i32.to_le_bytes());
        payload.extend(i32::try_from(frames.len()).unwrap().to_le_bytes());
        for frame in frames {
            dictionary(&mut payload, frame);
        }
        self.chunk(b"nTRN", &payload, &[])
    }

    /// `nGRP`.
    pub fn group(self, id: i32, attributes: &[(&str, &str)], children: &[i32]) -> Self {
        let mut payload = id.to_le_bytes().to_vec();
        dictionary(&mut payload, attributes);
        payload.extend(i32::try_from(children.len()).unwrap().to_le_bytes());
        for child in children {
            payload.extend(child.to_le_bytes());
        }
        self.chunk(b"nGRP", &payload, &[])
    }

    /// `nSHP` referencing one model.
    pub fn shape(self, id: i32, attributes: &[(&str, &str)], model: i32) -> Self {
        let no_attributes: &[(&str, &str)] = &[];
        self.shape_models(id, attributes, &[(model, no_attributes)])
    }

    /// `nSHP` with a model index and attribute dictionary per entry.
    pub fn shape_models(
        self,
        id: i32,
        attributes: &[(&str, &str)],
        models: &[(i32, &[(&str, &str)])],
    ) -> Self {
        let mut payload = id.to_le_bytes().to_vec();
        dictionary(&mut payload, attributes);
        payload.extend(i32::try_from(models.len()).unwrap().to_le_bytes());
        for (model, model_attributes) in models {
            payload.extend(model.to_le_bytes());
            dictionary(&mut payload, model_attributes);
        }
        self.chunk(b"nSHP", &payload, &[])
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = b"VOX ".to_vec();
        out.extend(self.version.to_le_bytes());
        out.extend(chunk(b"MAIN", &[], &self.children));
        out
    }
}

/// One 2x2x2 model with a single voxel at the origin.
pub fn minimal() -> VoxBuilder {
    VoxBuilder::new().size(2, 2, 2).voxels(&[[0, 0, 0, 1]]).palette(&[(1, [255, 0, 0, 255])])
}
