//! Optional configuration file support.
//!
//! eyebreak reads `~/.config/eyebreak/config.toml` if it exists. Every key
//! is optional; CLI flags take precedence over file values. A missing file
//! is not an error, a malformed one is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Name of the config directory under the user config root.
const CONFIG_DIR: &str = "eyebreak";

/// Name of the config file.
const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrongly typed keys.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

// ============================================================================
// FileConfig
// ============================================================================

/// User configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Work phase duration in seconds
    #[serde(default)]
    pub work_seconds: Option<u64>,

    /// Break phase duration in seconds
    #[serde(default)]
    pub break_seconds: Option<u64>,

    /// Lock poll interval in seconds
    #[serde(default)]
    pub lock_poll_seconds: Option<u64>,

    /// Whether to watch for screen unlock at all
    #[serde(default)]
    pub watch_lock: Option<bool>,
}

impl FileConfig {
    /// Returns the default config file path, if a config directory exists
    /// for this user.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the config file from the default location.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(None),
        }
    }

    /// Loads the config file from an explicit path.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(Some(config))
    }
}

// ============================================================================
// Tests
// ============================================================================
