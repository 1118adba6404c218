//! Unified path management for gosta files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/gosta/             # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/gosta/        # Data directory
//! └── local_storage.toml       # Draft session and device identity
//! ```

use std::path::PathBuf;

use gosta_core::error::GostaError;

const APP_DIR: &str = "gosta";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for GostaError {
    fn from(err: PathError) -> Self {
        GostaError::config(err.to_string())
    }
}

/// Platform paths for gosta (XDG on Linux, the platform default elsewhere).
pub struct GostaPaths;

impl GostaPaths {
    /// Returns the gosta configuration directory (e.g. `~/.config/gosta/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the gosta data directory (e.g. `~/.local/share/gosta/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the local storage file inside `dir`, or inside the default
    /// data directory when no override is given.
    pub fn local_storage_file(dir: Option<&PathBuf>) -> Result<PathBuf, PathError> {
        let dir = match dir {
            Some(dir) => dir.clone(),
            None => Self::data_dir()?,
        };
        Ok(dir.join("local_storage.toml"))
    }
}
