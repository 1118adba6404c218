use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gosta_application::Completion;
use gosta_core::service::UploadedFile;
use gosta_core::session::{STYLES, SUMMARY_TYPES, SUPPORTED_LANGUAGES, TONALITIES};

use super::context::CliContext;
use super::render::print_session;

/// Option flags given on the command line; unset ones keep the session's.
pub struct OptionOverrides {
    pub style: Option<String>,
    pub tonality: Option<String>,
    pub summary_type: Option<String>,
}

pub async fn summarize(
    ctx: &CliContext,
    text: Option<String>,
    file: Option<PathBuf>,
    overrides: OptionOverrides,
) -> Result<()> {
    let snapshot = ctx.controller.snapshot().await;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => snapshot.session.input_text.clone(),
    };

    let mut options = snapshot.session.options;
    if let Some(style) = overrides.style {
        options.style = style;
    }
    if let Some(tonality) = overrides.tonality {
        options.tonality = tonality;
    }
    if let Some(summary_type) = overrides.summary_type {
        options.summary_type = summary_type;
    }

    finish(ctx, ctx.controller.summarize(text, options).await).await
}

pub async fn regenerate(ctx: &CliContext) -> Result<()> {
    finish(ctx, ctx.controller.regenerate().await).await
}

pub async fn translate(ctx: &CliContext, language: &str) -> Result<()> {
    finish(ctx, ctx.controller.translate(language).await).await
}

pub async fn switch_type(ctx: &CliContext, summary_type: String) -> Result<()> {
    finish(ctx, ctx.controller.switch_summary_type(summary_type).await).await
}

pub async fn upload(ctx: &CliContext, path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    finish(ctx, ctx.controller.upload_file(UploadedFile::new(file_name, bytes)).await).await?;
    println!("📄 Input replaced; run `gosta summarize` to summarize it.");
    Ok(())
}

pub async fn show(ctx: &CliContext) {
    print_session(&ctx.controller.snapshot().await);
}

pub async fn new_session(ctx: &CliContext) {
    ctx.controller.new_session().await;
    println!("✨ Started a new session.");
}

pub async fn clear(ctx: &CliContext) {
    ctx.controller.clear().await;
    println!("🧹 Session cleared.");
}

pub fn options() {
    println!("Summary types: {}", SUMMARY_TYPES.join(", "));
    println!("Styles:        {}", STYLES.join(", "));
    println!("Tonalities:    {}", TONALITIES.join(", "));
    println!("Languages:");
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {code:<4} {name}");
    }
}

/// Prints the session after an operation, or turns its error into the
/// message shown to the user.
async fn finish(ctx: &CliContext, result: gosta_core::Result<Completion>) -> Result<()> {
    match result {
        Ok(Completion::Applied) => {
            print_session(&ctx.controller.snapshot().await);
            Ok(())
        }
        Ok(Completion::Discarded) => {
            println!("Result superseded by a newer request.");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
}
