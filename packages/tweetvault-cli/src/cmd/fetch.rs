//! `tweetvault fetch`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tweetvault::collect_bookmarks;

use super::{write_json, SourceArgs, SourceChoice};
use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file path
    #[arg(short, long, default_value = "bookmarks.json")]
    pub output: PathBuf,
}

pub async fn run(ctx: &AppContext, args: FetchArgs) -> Result<()> {
    let choice = args.source.resolve(&ctx.config)?;
    let limit = args.source.limit_for(&choice, &ctx.config);

    ctx.print_header("Fetching bookmarks");
    let label = match &choice {
        SourceChoice::Import(path) => format!("from {}", path.display()),
        SourceChoice::Live(_) => "from X".to_string(),
    };
    let source = choice.into_source()?;

    let bookmarks = collect_bookmarks(source.as_ref(), limit, |page| {
        ctx.print_info(&format!("Fetched {} bookmarks...", page.total));
    })
    .await?;

    ctx.print_success(&format!("Fetched {} bookmarks {}", bookmarks.len(), label));
    write_json(&args.output, &bookmarks)?;
    ctx.print_info(&format!("Saved to {}", args.output.display()));
    Ok(())
}
