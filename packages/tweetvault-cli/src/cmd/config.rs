//! `tweetvault config`

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;
use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration (secrets masked)
    Show,
}

pub fn run(ctx: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init { force } => run_init(ctx, force),
        ConfigCommand::Show => run_show(ctx),
    }
}

fn run_init(ctx: &AppContext, force: bool) -> Result<()> {
    let path = Config::default_path()?;
    Config::default().save(&path, force)?;
    ctx.print_success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn run_show(ctx: &AppContext) -> Result<()> {
    let path = Config::default_path()?;
    let rendered =
        toml::to_string_pretty(&ctx.config.masked()).context("Failed to serialize config")?;

    ctx.print_header(&format!("Configuration ({})", path.display()));
    println!("{}", rendered);
    Ok(())
}
