//! Reads shader files from disk with the existence/readability split the
//! load orchestrator needs for its error reporting.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("shader file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read shader file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the full text of a shader file. Existence is checked first so
/// a missing file and an unreadable file surface as distinct errors.
pub fn read_shader_source(path: &Path) -> Result<String, SourceError> {
    if !path.is_file() {
        return Err(SourceError::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read shader source");
    Ok(text)
}
