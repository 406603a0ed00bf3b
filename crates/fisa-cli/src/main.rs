//! CLI application for checking course specification sheets.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, plan, validate};

/// Course sheet checker - Extract and validate course specification sheets
#[derive(Parser)]
#[command(name = "fisa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single sheet
    Extract(extract::ExtractArgs),

    /// Validate a single sheet against the curriculum plan
    Validate(validate::ValidateArgs),

    /// Validate multiple sheets
    Batch(batch::BatchArgs),

    /// Inspect the curriculum plan
    Plan(plan::PlanArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so JSON on stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Validate(args) => validate::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Plan(args) => plan::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
