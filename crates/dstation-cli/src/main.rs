//! dstation CLI - Command-line client for Download Station
//!
//! Provides commands for:
//! - Logging in and out of the NAS
//! - Listing and controlling download tasks
//! - Browsing RSS feeds and triggering server-side refreshes
//! - Browsing shared folders to pick download destinations

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod output;

use commands::{
    auth::AuthCommand, feeds::FeedsCommand, fs::FsCommand, status::StatusCommand,
    tasks::TasksCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "dstation", version, about = "Download Station client for the terminal")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Manage download tasks
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Browse RSS feeds
    #[command(subcommand)]
    Feeds(FeedsCommand),
    /// Browse shared folders
    #[command(subcommand)]
    Fs(FsCommand),
    /// Show connection and transfer status
    Status(StatusCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Auth(cmd) => cmd.execute(format).await,
        Commands::Tasks(cmd) => cmd.execute(format).await,
        Commands::Feeds(cmd) => cmd.execute(format).await,
        Commands::Fs(cmd) => cmd.execute(format).await,
        Commands::Status(cmd) => cmd.execute(format).await,
    }
}
