use anyhow::Result;
use gosta_application::LoadOutcome;

use super::context::CliContext;
use super::render::{print_history, print_session};

pub async fn list(ctx: &CliContext, all: bool) {
    if all {
        while let LoadOutcome::Loaded(count) = ctx.controller.load_more_history().await {
            tracing::debug!("[history] Loaded {} more entries", count);
        }
    }

    print_history(&ctx.controller.snapshot().await.history);
}

pub async fn open(ctx: &CliContext, id: &str) -> Result<()> {
    if !ctx.controller.select_history_by_id(id).await {
        anyhow::bail!("Could not load history entry {id}");
    }

    println!("📂 Opened {id}\n");
    print_session(&ctx.controller.snapshot().await);
    Ok(())
}

pub async fn delete(ctx: &CliContext, id: &str) -> Result<()> {
    if !ctx.controller.delete_history_entry(id).await {
        anyhow::bail!("Could not delete history entry {id}");
    }

    println!("🗑️  Deleted {id}");
    Ok(())
}
