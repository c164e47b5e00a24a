//! `tweetvault classify`

use std::path::PathBuf;

use ai_client::AiClient;
use anyhow::{Context, Result};
use clap::Args;
use tweetvault::{collect_bookmarks, Classifier, JsonImporter};

use super::{write_json, AiArgs};
use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Bookmarks JSON file
    #[arg(short, long, default_value = "bookmarks.json")]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "classified.json")]
    pub output: PathBuf,

    #[command(flatten)]
    pub ai: AiArgs,
}

pub async fn run(ctx: &AppContext, args: ClassifyArgs) -> Result<()> {
    let ai_config = args.ai.ai_config(&ctx.config);
    let client = AiClient::new(ai_config).context("Invalid AI configuration")?;

    let importer = JsonImporter::new(&args.input);
    let bookmarks = collect_bookmarks(&importer, None, |_| {}).await?;
    if bookmarks.is_empty() {
        ctx.print_warning(&format!("No bookmarks found in {}", args.input.display()));
        return Ok(());
    }

    ctx.print_header(&format!(
        "Classifying {} bookmarks with {} ({})",
        bookmarks.len(),
        client.provider(),
        client.model()
    ));

    let options = args.ai.classifier_options(&ctx.config);
    let result = Classifier::new(client)
        .classify_with_progress(&bookmarks, &options, |batch| {
            ctx.print_info(&format!("Classified batch {}/{}", batch.batch, batch.batches));
        })
        .await?;

    ctx.print_success(&format!(
        "Classified into {} categories: {}",
        result.categories.len(),
        result.categories.join(", ")
    ));
    write_json(&args.output, &result)?;
    ctx.print_info(&format!("Saved to {}", args.output.display()));
    Ok(())
}
