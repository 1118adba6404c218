use anyhow::{Context, Result};
use gosta_core::config::ClientConfig;
use gosta_infrastructure::ApiClient;

pub async fn run(config: &ClientConfig) -> Result<()> {
    let api = ApiClient::from_config(config).context("Failed to create HTTP client")?;

    match api.health().await {
        Ok(status) => {
            println!("✅ {} is up (status: {})", api.base_url(), status);
            Ok(())
        }
        Err(e) => anyhow::bail!("Backend at {} is unreachable: {}", api.base_url(), e.user_message()),
    }
}
