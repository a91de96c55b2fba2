use std::path::PathBuf;

use tracing::debug;

use super::fs::FileSystem;
use crate::config::Config;

/// Finds the canonical translation file under a set of workspace roots.
#[derive(Debug, Clone)]
pub struct FileLocator {
    /// Relative paths checked under every root, highest priority first.
    pub candidates: Vec<String>,
    /// File name searched for recursively when no candidate exists.
    pub fallback_file_name: String,
    /// Directory names skipped by the recursive search.
    pub excluded_dirs: Vec<String>,
}

impl Default for FileLocator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FileLocator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            candidates: config.translation_paths.clone(),
            fallback_file_name: config.fallback_file_name.clone(),
            excluded_dirs: config.excluded_dirs.clone(),
        }
    }

    /// Locate the translation file.
    ///
    /// Candidates are tried root by root, then candidate by candidate. If none
    /// exists, the roots are searched recursively for `fallback_file_name`.
    /// `None` is an ordinary outcome, not an error.
    pub fn locate(&self, fs: &dyn FileSystem, roots: &[PathBuf]) -> Option<PathBuf> {
        for root in roots {
            for candidate in &self.candidates {
                let path = root.join(candidate);
                if fs.exists(&path) {
                    debug!(path = %path.display(), "found translation file at known location");
                    return Some(path);
                }
            }
        }

        let found = fs.find_file(roots, &self.fallback_file_name, &self.excluded_dirs);
        match &found {
            Some(path) => debug!(path = %path.display(), "found translation file by search"),
            None => debug!(roots = roots.len(), "no translation file found"),
        }
        found
    }
}
