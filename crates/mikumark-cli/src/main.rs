//! Mikumark CLI - markup to HTML converter.
//!
//! Provides commands for:
//! - `render`: Convert documents to HTML (and outline JSON)
//! - `outline`: Print a document's heading outline
//! - `check`: Report malformed constructs without writing output

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, OutlineArgs, RenderArgs};
use output::Output;

/// Mikumark - markup to HTML converter.
#[derive(Parser)]
#[command(name = "mikumark", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documents to HTML.
    Render(RenderArgs),
    /// Print the heading outline of a document.
    Outline(OutlineArgs),
    /// Check documents for malformed constructs.
    Check(CheckArgs),
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
