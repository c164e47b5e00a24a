//! `tweetvault` command-line front end.
//!
//! Each pipeline stage is a subcommand of its own (`fetch`, `classify`, `generate`) and
//! `sync` runs all three.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod config;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "tweetvault")]
#[command(about = "Turn your X bookmarks into an Obsidian vault")]
#[command(version)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose logging (same as RUST_LOG=debug for TweetVault crates)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch bookmarks and save them as JSON
    Fetch(cmd::fetch::FetchArgs),

    /// Classify a bookmarks file with an AI provider
    Classify(cmd::classify::ClassifyArgs),

    /// Generate a vault from a classification file
    Generate(cmd::generate::GenerateArgs),

    /// Fetch, classify and generate in one go
    Sync(cmd::sync::SyncArgs),

    /// Manage ~/.tweetvault/config.toml
    #[command(subcommand)]
    Config(cmd::config::ConfigCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,tweetvault=debug,x_client=debug,ai_client=debug"
    } else {
        "warn,tweetvault=info,x_client=info,ai_client=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::new(cli.quiet)?;

    match cli.command {
        Commands::Fetch(args) => cmd::fetch::run(&ctx, args).await,
        Commands::Classify(args) => cmd::classify::run(&ctx, args).await,
        Commands::Generate(args) => cmd::generate::run(&ctx, args).await,
        Commands::Sync(args) => cmd::sync::run(&ctx, args).await,
        Commands::Config(cmd) => cmd::config::run(&ctx, cmd),
    }
}
