//! Normalizes user-entered shader names into loadable paths: strips the
//! quotes shells and file managers like to add, applies the default
//! `.txt` extension, and resolves bare names against the plugin module
//! directory the way hosts expect (module dir first, then a `Shaders/`
//! subdirectory, falling back to the module dir).

use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Extension assumed when the user supplies a bare name.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Removes one pair of surrounding double quotes, if present.
pub fn strip_quotes(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Appends [`DEFAULT_EXTENSION`] when the path has none. An existing
/// extension is never replaced.
pub fn default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Resolves user input to a shader file path relative to the plugin's
/// module directory.
#[derive(Debug, Clone)]
pub struct ShaderLocator {
    module_dir: PathBuf,
}

impl ShaderLocator {
    pub fn new(module_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_dir: module_dir.into(),
        }
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// Turns a user-entered name or path into the path the loader should
    /// try. Inputs carrying any directory component are used as-is (after
    /// quote stripping and extension defaulting); bare names are searched
    /// next to the module, then in `Shaders/`.
    pub fn resolve(&self, input: &str) -> PathBuf {
        let cleaned = strip_quotes(input);
        let candidate = default_extension(PathBuf::from(cleaned));

        let is_bare = candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
            && candidate.components().count() == 1;
        if !is_bare {
            debug!(input, path = %candidate.display(), "using user-supplied shader path");
            return candidate;
        }

        let beside_module = self.module_dir.join(&candidate);
        if beside_module.is_file() {
            debug!(input, path = %beside_module.display(), "found shader beside module");
            return beside_module;
        }

        let shaders_dir = self.module_dir.join("Shaders");
        if shaders_dir.is_dir() {
            let in_shaders = shaders_dir.join(&candidate);
            debug!(input, path = %in_shaders.display(), "resolved shader into Shaders subfolder");
            return in_shaders;
        }

        debug!(input, path = %beside_module.display(), "defaulting shader beside module");
        beside_module
    }
}
