//! `tweetvault generate`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tweetvault::{ClassificationResult, VaultGenerator};

use super::VaultArgs;
use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Classified JSON file
    #[arg(short, long, default_value = "classified.json")]
    pub input: PathBuf,

    #[command(flatten)]
    pub vault: VaultArgs,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let classification: ClassificationResult = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    ctx.print_header(&format!(
        "Generating vault from {} bookmarks",
        classification.items.len()
    ));

    let options = args.vault.vault_options(&ctx.config);
    let result = VaultGenerator::new()
        .generate(&classification.items, &options)
        .await?;

    ctx.print_success(&format!(
        "Generated {} files in {}",
        result.files_created,
        result.output_dir.display()
    ));
    ctx.print_info(&format!(
        "Categories: {}",
        result.categories_created.join(", ")
    ));
    Ok(())
}
