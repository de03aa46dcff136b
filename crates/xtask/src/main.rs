//! Development tasks for the maps database
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Show};

/// Development tasks for the maps database
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the maps database", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load a maps document and report skipped entries
    Check(Check),

    /// Print one map record
    Show(Show),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MAPS_DATABASE_PATH and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(cmd) => cmd.execute(),
        Command::Show(cmd) => cmd.execute(),
    }
}
