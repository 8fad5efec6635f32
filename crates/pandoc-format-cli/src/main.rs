//! pandoc-format CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pandoc-format")]
#[command(version)]
#[command(about = "Resolve the pandoc markdown format of a document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the pandoc format for a document or an explicit mode
    Resolve(ResolveArgs),

    /// Show the format configuration declared in a document
    Config {
        /// Input document
        input: PathBuf,
    },
}

/// Arguments for the resolve command.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Input document to read editor options from
    pub input: Option<PathBuf>,

    /// Markdown mode (overrides the document)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Extension toggles, e.g. "+emoji-smart" (overrides the document)
    #[arg(short, long, allow_hyphen_values = true)]
    pub extensions: Option<String>,

    /// Read $math$ inside code spans (goldmark and blackfriday)
    #[arg(long)]
    pub math_in_code: bool,

    /// Path to the pandoc binary (defaults to QUARTO_PANDOC, then PATH)
    #[arg(long)]
    pub pandoc: Option<PathBuf>,

    /// Print the resolved format as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pandoc_format=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Config { input } => commands::config::execute(&input),
    }
}
