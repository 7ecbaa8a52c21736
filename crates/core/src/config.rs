//! Export configuration.
//!
//! Settings that are not part of the host scene itself: where relative
//! asset paths are anchored, extra search paths recorded on the project,
//! texture sampling defaults and the log filter.
//!
//! # Example
//!
//! ```
//! use exporter_core::ExportConfig;
//!
//! let config: ExportConfig = toml::from_str(
//!     r#"
//!     blend_dir = "/projects/shot_010"
//!     search_paths = ["textures"]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.texture_filtering_mode, "bilinear");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Configuration for a single export run.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory of the host scene file; `//`-prefixed paths resolve here.
    pub blend_dir: PathBuf,
    /// Extra directories the renderer searches for assets.
    pub search_paths: Vec<PathBuf>,
    /// Overrides the default tracing filter when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Addressing mode given to every texture instance.
    pub texture_addressing_mode: String,
    /// Filtering mode given to every texture instance.
    pub texture_filtering_mode: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            blend_dir: PathBuf::from("."),
            search_paths: Vec::new(),
            log_filter: None,
            texture_addressing_mode: "wrap".to_owned(),
            texture_filtering_mode: "bilinear".to_owned(),
        }
    }
}

const ADDRESSING_MODES: &[&str] = &["clamp", "wrap"];
const FILTERING_MODES: &[&str] = &["nearest", "bilinear"];

impl ExportConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the texture sampling modes are ones the renderer knows.
    pub fn validate(&self) -> Result<()> {
        if !ADDRESSING_MODES.contains(&self.texture_addressing_mode.as_str()) {
            return Err(Error::Config(format!(
                "unknown texture addressing mode '{}'",
                self.texture_addressing_mode
            )));
        }
        if !FILTERING_MODES.contains(&self.texture_filtering_mode.as_str()) {
            return Err(Error::Config(format!(
                "unknown texture filtering mode '{}'",
                self.texture_filtering_mode
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.blend_dir, PathBuf::from("."));
        assert!(config.search_paths.is_empty());
        assert_eq!(config.texture_addressing_mode, "wrap");
        assert_eq!(config.texture_filtering_mode, "bilinear");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExportConfig = toml::from_str("blend_dir = \"/tmp/scene\"").unwrap();
        assert_eq!(config.blend_dir, PathBuf::from("/tmp/scene"));
        assert_eq!(config.texture_addressing_mode, "wrap");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: std::result::Result<ExportConfig, _> = toml::from_str("colour = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_filtering_mode() {
        let config = ExportConfig {
            texture_filtering_mode: "trilinear".to_owned(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
