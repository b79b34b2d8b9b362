//! Typed error surfaces of the runtime core. Load-time errors never
//! disturb a previously loaded shader; the frame-time error skips one
//! frame and self-heals on the host's next call.

use std::path::PathBuf;

use thiserror::Error;

use dialect::{DialectError, SourceError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("shader file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read shader file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    NotAShader(#[from] DialectError),

    #[error("shader compile failed for {0}")]
    Compile(PathBuf),

    #[error("shader bind failed after compile for {0}")]
    Bind(PathBuf),
}

impl From<SourceError> for LoadError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::FileNotFound(path) => LoadError::FileNotFound(path),
            SourceError::Read { path, source } => LoadError::Read { path, source },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("no active rendering context; frame skipped")]
    NoActiveContext,
}
