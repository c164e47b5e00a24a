//! Application context with shared state and output helpers

use anyhow::Result;
use console::style;

use crate::config::Config;

/// Application context passed to all commands
pub struct AppContext {
    pub quiet: bool,
    /// Config file with environment overrides applied
    pub config: Config,
}

impl AppContext {
    pub fn new(quiet: bool) -> Result<Self> {
        let config = Config::load_default()?;
        tracing::debug!(
            provider = %config.ai.provider,
            has_cookie = config.fetch.cookie.is_some(),
            "Loaded configuration"
        );
        Ok(Self { quiet, config })
    }

    pub fn print_header(&self, msg: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(msg).bold());
        }
    }

    pub fn print_step(&self, step: u8, msg: &str) {
        if !self.quiet {
            println!("{} {}", style(format!("[{}/3]", step)).dim(), msg);
        }
    }

    pub fn print_success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).green());
        }
    }

    pub fn print_warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).yellow());
        }
    }

    pub fn print_info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).cyan());
        }
    }
}
