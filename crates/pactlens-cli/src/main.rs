//! PactLens CLI - Command-line client for the contract risk analysis backend
//!
//! Provides commands for:
//! - Authentication (login, logout, registration, password change)
//! - Managing uploaded contracts and their analysis results
//! - Viewing shared contracts and submitting feedback anonymously

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod wiring;

use commands::{auth::AuthCommand, contracts::ContractsCommand, shared::SharedCommand};
use output::OutputFormat;
use pactlens_core::config::Config;

#[derive(Debug, Parser)]
#[command(name = "pactlens", version, about = "Contract risk analysis client")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Manage uploaded contracts
    #[command(subcommand)]
    Contracts(ContractsCommand),
    /// View shared contracts and leave feedback
    #[command(subcommand)]
    Shared(SharedCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path()),
    };
    for error in config.validate() {
        tracing::warn!("config: {error}");
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Auth(cmd) => cmd.execute(&config, format).await,
        Commands::Contracts(cmd) => cmd.execute(&config, format).await,
        Commands::Shared(cmd) => cmd.execute(&config, format).await,
    }
}
