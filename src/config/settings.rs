//! Run settings: mapping file name, delimiter and root directory.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable that overrides [`Settings::root`].
pub const ROOT_ENV: &str = "DOTLINK_ROOT";

/// Immutable settings for one run.
///
/// Built once at startup from an optional TOML file and passed explicitly to
/// the parser, the command layer and the guards.
///
/// ```toml
/// file_name = "links.conf"
/// delimiter = ","
/// root = "dotfiles"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base name the mapping file argument must carry.
    pub file_name: String,
    /// Field separator used in the mapping file.
    pub delimiter: char,
    /// Directory the tool must be started from; relative paths resolve against home.
    pub root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name: "links.conf".to_string(),
            delimiter: ',',
            root: PathBuf::from("dotfiles"),
        }
    }
}

impl Settings {
    /// Default location of the settings file: `<config dir>/dotlink/settings.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dotlink").join("settings.toml"))
    }

    /// Load settings from `path`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
    /// [`ConfigError::Settings`] if it is not valid TOML or has unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Settings {
            path: path.to_path_buf(),
            message: e.to_string().trim().to_string(),
        })
    }

    /// Replace the root directory when an override is given.
    #[must_use]
    pub fn with_root_override(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root.filter(|r| !r.as_os_str().is_empty()) {
            self.root = root;
        }
        self
    }

    /// Root directory resolved against `home`.
    #[must_use]
    pub fn resolved_root(&self, home: &Path) -> PathBuf {
        home.join(&self.root)
    }
}
