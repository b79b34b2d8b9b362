//! Durable storage for the last successfully loaded shader path. The
//! value is read once at plugin initialization and written once per
//! successful load, so the store stays a tiny TOML file in the per-user
//! config directory rather than anything clever.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

const STORE_FILE: &str = "last-shader.toml";

#[derive(Debug, Serialize, Deserialize)]
struct StoredPath {
    path: String,
}

/// File-backed store for the single persisted string.
#[derive(Debug, Clone)]
pub struct LastPathStore {
    file: PathBuf,
}

impl LastPathStore {
    /// Opens the store in the per-user config directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "shaderdeck")
            .ok_or_else(|| anyhow!("unable to determine a config directory for shaderdeck"))?;
        Ok(Self {
            file: dirs.config_dir().join(STORE_FILE),
        })
    }

    /// Opens a store backed by an explicit file, used by tests and hosts
    /// that manage their own state directory.
    pub fn at(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Returns the persisted path, or `None` when nothing was stored yet
    /// or the file cannot be parsed.
    pub fn read(&self) -> Option<PathBuf> {
        let raw = fs::read_to_string(&self.file).ok()?;
        match toml::from_str::<StoredPath>(&raw) {
            Ok(stored) => {
                debug!(path = %stored.path, "recalled last shader path");
                Some(PathBuf::from(stored.path))
            }
            Err(err) => {
                debug!(file = %self.file.display(), error = %err, "ignoring unparseable path store");
                None
            }
        }
    }

    /// Persists the given path, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory {}", parent.display()))?;
        }
        let stored = StoredPath {
            path: path.to_string_lossy().into_owned(),
        };
        let body = toml::to_string(&stored).context("failed to serialize shader path")?;
        fs::write(&self.file, body)
            .with_context(|| format!("failed to write path store {}", self.file.display()))?;
        debug!(path = %path.display(), "persisted last shader path");
        Ok(())
    }
}
