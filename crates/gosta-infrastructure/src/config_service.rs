//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `~/.config/gosta/config.toml` and applies
//! environment overrides on top.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use gosta_core::config::ClientConfig;
use gosta_core::error::Result;

use crate::paths::GostaPaths;

/// Overrides `api_base_url`.
pub const ENV_API_URL: &str = "GOSTA_API_URL";
/// Overrides `storage_dir`.
pub const ENV_STORAGE_DIR: &str = "GOSTA_STORAGE_DIR";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; the platform default is used when `None`.
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads from `path` instead of the platform config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let path = match &self.path {
            Some(path) => path.clone(),
            None => GostaPaths::config_file()?,
        };

        let mut loaded = Self::load_file(&path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());
        loaded.validate()?;

        tracing::debug!(
            "[ConfigService] Loaded config from {:?}: api_base_url={}, page_size={}",
            path,
            loaded.api_base_url,
            loaded.history_page_size
        );

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Parses a config file; a missing or empty file yields defaults.
    pub fn load_file(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.trim().is_empty()) {
        config.storage_dir = Some(PathBuf::from(dir));
    }
}
