//! Wiring of the HTTP adapters and local storage into a started controller.

use std::sync::Arc;

use anyhow::{Context, Result};
use gosta_application::SessionController;
use gosta_core::config::ClientConfig;
use gosta_infrastructure::paths::GostaPaths;
use gosta_infrastructure::{ApiClient, FileLocalStorage, HttpHistoryRepository, HttpSummarizerClient};

pub struct CliContext {
    pub controller: SessionController,
}

impl CliContext {
    /// Builds the controller and runs its startup (draft restore and first
    /// history page).
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::from_config(config).context("Failed to create HTTP client")?;
        let storage_file = GostaPaths::local_storage_file(config.storage_dir.as_ref())
            .context("Failed to resolve local storage location")?;
        tracing::debug!("[CliContext] Using local storage at {:?}", storage_file);

        let summarizer = Arc::new(HttpSummarizerClient::new(api.clone()));
        let controller = SessionController::new(
            summarizer.clone(),
            summarizer,
            Arc::new(HttpHistoryRepository::new(api)),
            Arc::new(FileLocalStorage::new(storage_file)),
            config.history_page_size,
        );
        controller.start().await;

        Ok(Self { controller })
    }
}
