//! Resolution of host asset paths.

use std::path::{Path, PathBuf};

use exporter_core::ExportConfig;

/// Prefix hosts use for paths relative to the scene file.
const RELATIVE_PREFIX: &str = "//";

/// Resolves asset paths stored in the host scene to renderer paths.
#[derive(Debug, Clone)]
pub struct AssetHandler {
    config: ExportConfig,
}

impl AssetHandler {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Resolve a host path.
    ///
    /// `//`-prefixed and other relative paths are anchored at the configured
    /// scene directory; absolute paths are kept as they are.
    pub fn process_path(&self, path: &str) -> String {
        let resolved: PathBuf = match path.strip_prefix(RELATIVE_PREFIX) {
            Some(relative) => self.config.blend_dir.join(relative),
            None if Path::new(path).is_absolute() => PathBuf::from(path),
            None => self.config.blend_dir.join(path),
        };
        resolved.to_string_lossy().into_owned()
    }
}
