//! # Import Configuration
//!
//! Limits applied while parsing. Loaded once at startup, usually from TOML:
//!
//! ```toml
//! max_chunk_depth = 10
//! max_node_children = 64
//! require_palette = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{VoxError, VoxResult};

/// Parser limits and policies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Maximum nesting of chunks with children.
    pub max_chunk_depth: usize,
    /// Children kept per group node; the rest are dropped with a warning.
    pub max_node_children: usize,
    /// Frames kept per transform node; the rest are dropped with a warning.
    pub max_node_frames: usize,
    /// Models kept per shape node; the rest are dropped with a warning.
    pub max_shape_models: usize,
    /// Maximum ancestors visited when resolving one shape.
    pub max_scene_depth: usize,
    /// Maximum `width * height * depth` of a single model.
    pub max_frame_voxels: u64,
    /// Maximum `width * height * depth` summed over every model of one file.
    /// Each `SIZE` is checked against what is left before its grid is allocated.
    pub max_total_voxels: u64,
    /// Fail with [`VoxError::MissingFormatChunk`] when no palette is present.
    /// When false, the built-in palette is used instead.
    pub require_palette: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_chunk_depth: 10,
            max_node_children: 64,
            max_node_frames: 64,
            max_shape_models: 64,
            max_scene_depth: 256,
            max_frame_voxels: 256 * 256 * 256,
            max_total_voxels: 2 * 256 * 256 * 256,
            require_palette: true,
        }
    }
}

impl ImportConfig {
    /// Parses and validates a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidConfig`] on malformed TOML or invalid limits.
    pub fn from_toml_str(source: &str) -> VoxResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| VoxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::Io`] if the file cannot be read, otherwise as
    /// [`ImportConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> VoxResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded import config from {}", path.display());
        Ok(config)
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidConfig`] naming the first bad limit.
    pub fn validate(&self) -> VoxResult<()> {
        let limits = [
            ("max_chunk_depth", self.max_chunk_depth),
            ("max_node_children", self.max_node_children),
            ("max_node_frames", self.max_node_frames),
            ("max_shape_models", self.max_shape_models),
            ("max_scene_depth", self.max_scene_depth),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(VoxError::InvalidConfig(format!("{name} must be at least 1")));
        }
        if self.max_frame_voxels == 0 || self.max_frame_voxels > u64::from(u32::MAX) {
            return Err(VoxError::InvalidConfig(format!(
                "max_frame_voxels must be in 1..={}, got {}",
                u32::MAX,
                self.max_frame_voxels
            )));
        }
        if self.max_total_voxels < self.max_frame_voxels {
            return Err(VoxError::InvalidConfig(format!(
                "max_total_voxels ({}) must be at least max_frame_voxels ({})",
                self.max_total_voxels, self.max_frame_voxels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ImportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chunk_depth, 10);
        assert!(config.require_palette);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ImportConfig::from_toml_str(
            "max_node_children = 4\nrequire_palette = false\n",
        )
        .unwrap();
        assert_eq!(config.max_node_children, 4);
        assert!(!config.require_palette);
        assert_eq!(config.max_node_frames, ImportConfig::default().max_node_frames);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = ImportConfig::from_toml_str("max_chunk_depth = 0").unwrap_err();
        assert!(matches!(err, VoxError::InvalidConfig(msg) if msg.contains("max_chunk_depth")));
    }

    #[test]
    fn test_oversized_frame_limit_rejected() {
        let err = ImportConfig::from_toml_str("max_frame_voxels = 5000000000").unwrap_err();
        assert!(matches!(err, VoxError::InvalidConfig(_)));
    }

    #[test]
    fn test_total_budget_below_frame_limit_rejected() {
        let err = ImportConfig::from_toml_str("max_total_voxels = 8").unwrap_err();
        assert!(matches!(err, VoxError::InvalidConfig(msg) if msg.contains("max_total_voxels")));

        let config =
            ImportConfig::from_toml_str("max_frame_voxels = 8\nmax_total_voxels = 8").unwrap();
        assert_eq!(config.max_total_voxels, 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.toml");
        std::fs::write(&path, "max_scene_depth = 8\n").unwrap();
        assert_eq!(ImportConfig::load(&path).unwrap().max_scene_depth, 8);

        let missing = ImportConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(VoxError::Io(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            ImportConfig::from_toml_str("max_chunk_depth = \"deep\""),
            Err(VoxError::InvalidConfig(_))
        ));
    }
}
