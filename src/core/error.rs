use std::{io, path::PathBuf};

use thiserror::Error;

/// Why the translation store could not serve an index.
///
/// None of these are fatal: callers report them to the user and carry on
/// with no completions or links for the current request.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No translation file could be located under the workspace roots.
    #[error("Could not find {file_name} file in the workspace")]
    NotFound { file_name: String },

    /// The file exists but is not valid JSON once whole-line comments are removed.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The file could not be read (permissions, deleted between locate and read, ...).
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LookupError {
    /// Whether this error should be surfaced as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
