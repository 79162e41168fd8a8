//! File and directory loading.

use std::fs;
use std::path::{Path, PathBuf};

use voxpipe_core::{FrameSet, VoxResult};

use crate::importer::VoxImporter;

/// Reads `.vox` files from disk.
pub struct VoxLoader;

impl VoxLoader {
    /// Loads and imports a file.
    ///
    /// Frames without a scene name are named after the file stem, suffixed
    /// with their index when the file holds more than one frame.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or has invalid format.
    pub fn load<P: AsRef<Path>>(path: P, importer: &mut VoxImporter) -> VoxResult<FrameSet> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();

        let data = fs::read(path)?;
        let mut frames = importer.parse(&data)?;

        let single = frames.len() == 1;
        for (index, frame) in frames.frames_mut().iter_mut().enumerate() {
            if frame.name.is_none() {
                frame.name = Some(if single { stem.clone() } else { format!("{stem}_{index}") });
            }
        }
        tracing::debug!(path = %path.display(), frames = frames.len(), "loaded vox file");
        Ok(frames)
    }
}

/// Directory of `.vox` assets addressed by file stem.
#[derive(Debug, Clone)]
pub struct VoxAssetDirectory {
    base_path: PathBuf,
}

impl VoxAssetDirectory {
    /// Creates a directory view rooted at `base_path`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Loads `{name}.vox`.
    ///
    /// # Errors
    ///
    /// Returns error if the model cannot be found or loaded.
    pub fn load(&self, name: &str, importer: &mut VoxImporter) -> VoxResult<FrameSet> {
        VoxLoader::load(self.base_path.join(format!("{name}.vox")), importer)
    }

    /// Stems of every `.vox` file, sorted. An unreadable directory lists nothing.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut files = Vec::new();

        if let Ok(entries) = fs::read_dir(&self.base_path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "vox") {
                    if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                        files.push(name.to_string());
                    }
                }
            }
        }

        files.sort();
        files
    }
}
