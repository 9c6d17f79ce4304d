//! Kalma - personal task tracker and mood self-assessment
//!
//! Command-line entry point over the `kalma_core` library.

mod cli;

use clap::{Parser, Subcommand};
use anyhow::{Context as _, Result};
use kalma_core::{AssessmentForm, KalmaConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use cli::{helpers::Context, task::TaskAction};

#[derive(Parser)]
#[command(name = "kalma")]
#[command(about = "Personal task tracker and mood self-assessment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level (overrides the config file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Database path (overrides KALMA_DB_PATH and the config file)
    #[arg(long)]
    db_path: Option<String>,

    /// Config file (defaults to <config dir>/kalma/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Profile whose tasks to use (overrides KALMA_OWNER and the config file)
    #[arg(long)]
    owner: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize database (at --db-path or the configured location)
    Init,

    /// Take the mood self-assessment
    Assess {
        /// How overwhelmed do you feel? (1-10)
        #[arg(long)]
        q1: Option<String>,

        /// How tense or restless do you feel? (1-10)
        #[arg(long)]
        q2: Option<String>,

        /// How well did you sleep? (1-10)
        #[arg(long)]
        q3: Option<String>,

        /// Emoji rating of your day (1-5)
        #[arg(long = "emoji")]
        emoji_score: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Task management
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show task counts
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Show tasks, counts and a motivational message
    Dashboard {
        #[arg(long)]
        json: bool,
    },

    /// Print a motivational message
    Motivate,
}

fn init_tracing(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "kalma={},libsql=warn",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // keep stdout clean for --json
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        KalmaConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));

    debug!("Kalma v{} starting...", env!("CARGO_PKG_VERSION"));

    let ctx = Context::new(&config, cli.db_path.as_deref(), cli.owner);

    match cli.command {
        Commands::Init => cli::init::handle(&ctx).await,
        Commands::Assess {
            q1,
            q2,
            q3,
            emoji_score,
            json,
        } => cli::assess::handle(
            AssessmentForm {
                q1,
                q2,
                q3,
                emoji_score,
            },
            json,
        ),
        Commands::Task { action } => cli::task::handle(action, &ctx).await,
        Commands::Stats { json } => cli::dashboard::handle_stats(&ctx, json).await,
        Commands::Dashboard { json } => cli::dashboard::handle_dashboard(&ctx, json).await,
        Commands::Motivate => cli::dashboard::handle_motivate(),
    }
}
