//! Client configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GostaError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Root configuration, read from `config.toml`.
///
/// Every field has a default so a partial or missing file still yields a
/// usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the summarizer API, without a trailing slash.
    pub api_base_url: String,
    /// Number of history entries requested per page.
    pub history_page_size: usize,
    pub request_timeout_secs: u64,
    /// Overrides the directory holding the local draft and device identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Checks values the rest of the client relies on.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(GostaError::config("api_base_url must not be empty"));
        }
        if self.history_page_size == 0 {
            return Err(GostaError::config("history_page_size must be greater than 0"));
        }
        Ok(())
    }

    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
