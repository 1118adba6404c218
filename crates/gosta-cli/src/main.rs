use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use gosta_core::config::ClientConfig;
use gosta_core::session::{STYLES, SUMMARY_TYPES, TONALITIES};
use gosta_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::context::CliContext;

#[derive(Parser)]
#[command(name = "gosta")]
#[command(about = "Gosta CLI - summarize transcripts and keep a per-device history", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/gosta/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend API base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the local session draft and device identity
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text (argument, --file, or the current draft input)
    Summarize {
        text: Option<String>,

        /// Read the transcript from a local file
        #[arg(long, short, conflicts_with = "text")]
        file: Option<PathBuf>,

        #[arg(long, value_parser = PossibleValuesParser::new(STYLES))]
        style: Option<String>,

        #[arg(long, value_parser = PossibleValuesParser::new(TONALITIES))]
        tonality: Option<String>,

        #[arg(long = "type", value_parser = PossibleValuesParser::new(SUMMARY_TYPES))]
        summary_type: Option<String>,
    },
    /// Summarize the current input again with the current options
    Regenerate,
    /// Translate the summary ("original" switches back)
    Translate { language: String },
    /// Switch the summary type, regenerating an existing summary
    Type {
        #[arg(value_parser = PossibleValuesParser::new(SUMMARY_TYPES))]
        summary_type: String,
    },
    /// Replace the input with the text of an uploaded .txt file
    Upload { path: PathBuf },
    /// Show the current session
    Show,
    /// Save the current work to history and start over
    New,
    /// Discard the current session without saving
    Clear,
    /// Browse saved summaries
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List the accepted option values and translation languages
    Options,
    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved summaries, newest first
    List {
        /// Keep paging until the whole history is loaded
        #[arg(long)]
        all: bool,
    },
    /// Load a saved summary into the session
    Open { id: String },
    /// Delete a saved summary
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Options => commands::session::options(),
        Commands::Health => commands::health::run(&config).await?,
        command => run_session_command(&config, command).await?,
    }

    Ok(())
}

async fn run_session_command(config: &ClientConfig, command: Commands) -> Result<()> {
    let ctx = CliContext::connect(config).await?;

    match command {
        Commands::Summarize {
            text,
            file,
            style,
            tonality,
            summary_type,
        } => {
            let overrides = commands::session::OptionOverrides {
                style,
                tonality,
                summary_type,
            };
            commands::session::summarize(&ctx, text, file, overrides).await?
        }
        Commands::Regenerate => commands::session::regenerate(&ctx).await?,
        Commands::Translate { language } => commands::session::translate(&ctx, &language).await?,
        Commands::Type { summary_type } => {
            commands::session::switch_type(&ctx, summary_type).await?
        }
        Commands::Upload { path } => commands::session::upload(&ctx, &path).await?,
        Commands::Show => commands::session::show(&ctx).await,
        Commands::New => commands::session::new_session(&ctx).await,
        Commands::Clear => commands::session::clear(&ctx).await,
        Commands::History { action } => match action {
            HistoryAction::List { all } => commands::history::list(&ctx, all).await,
            HistoryAction::Open { id } => commands::history::open(&ctx, &id).await?,
            HistoryAction::Delete { id } => commands::history::delete(&ctx, &id).await?,
        },
        // Handled before any session is opened.
        Commands::Options | Commands::Health => {}
    }

    Ok(())
}

/// File, then environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    };

    let mut config = service.get_config().context("Failed to load configuration")?;
    if let Some(api_url) = &cli.api_url {
        config.api_base_url = api_url.clone();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = Some(dir.clone());
    }
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Logs go to stderr; `RUST_LOG` takes precedence over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
