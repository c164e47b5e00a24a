//! `tweetvault sync`

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tweetvault::{sync_bookmarks, SyncConfig};

use super::{write_json, AiArgs, SourceArgs, SourceChoice, VaultArgs};
use crate::context::AppContext;

/// Classification snapshot written to the working directory after a sync.
const CLASSIFIED_SNAPSHOT: &str = "tweetvault-classified.json";

#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub ai: AiArgs,

    #[command(flatten)]
    pub vault: VaultArgs,
}

pub async fn run(ctx: &AppContext, args: SyncArgs) -> Result<()> {
    let config = sync_config(ctx, &args)?;

    ctx.print_header("Syncing bookmarks");
    let result = sync_bookmarks(&config, |progress| {
        ctx.print_step(progress.step, &progress.detail);
    })
    .await?;

    ctx.print_success(&format!(
        "Done! Vault created at: {}",
        result.output_dir.display()
    ));
    ctx.print_info(&format!("Categories: {}", result.categories.join(", ")));

    write_json(Path::new(CLASSIFIED_SNAPSHOT), &result.classification)?;
    Ok(())
}

fn sync_config(ctx: &AppContext, args: &SyncArgs) -> Result<SyncConfig> {
    let choice = args.source.resolve(&ctx.config)?;
    let limit = args.source.limit_for(&choice, &ctx.config);
    let (input_path, cookie) = match choice {
        SourceChoice::Import(path) => (Some(path), None),
        SourceChoice::Live(cookie) => (None, Some(cookie)),
    };

    let classifier = args.ai.classifier_options(&ctx.config);
    let vault = args.vault.vault_options(&ctx.config);

    Ok(SyncConfig {
        input_path,
        cookie,
        limit,
        ai: args.ai.ai_config(&ctx.config),
        output_dir: vault.output_dir,
        vault_name: vault.vault_name,
        include_media: vault.include_media,
        create_index: vault.create_index,
        language: classifier.language,
        categories: classifier.categories,
        batch_size: classifier.batch_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ctx(config: Config) -> AppContext {
        AppContext {
            quiet: true,
            config,
        }
    }

    #[test]
    fn test_sync_config_from_flags_and_file() {
        let mut config = Config::default();
        config.ai.api_key = Some("sk-file".into());
        config.output.language = Some("German".into());

        let args = SyncArgs {
            source: SourceArgs {
                input: Some("marks.json".into()),
                ..Default::default()
            },
            ai: AiArgs {
                batch_size: Some(5),
                ..Default::default()
            },
            vault: VaultArgs {
                output: Some("vault".into()),
                no_index: true,
                ..Default::default()
            },
        };

        let sync = sync_config(&ctx(config), &args).unwrap();
        assert_eq!(sync.input_path.as_deref(), Some(Path::new("marks.json")));
        assert!(sync.cookie.is_none());
        assert_eq!(sync.limit, None);
        assert_eq!(sync.ai.provider, "claude");
        assert_eq!(sync.ai.api_key.as_deref(), Some("sk-file"));
        assert_eq!(sync.language.as_deref(), Some("German"));
        assert_eq!(sync.batch_size, Some(5));
        assert_eq!(sync.output_dir, Path::new("vault"));
        assert!(!sync.create_index);
        assert!(sync.include_media);
        assert!(sync.validate().is_ok());
    }

    #[test]
    fn test_live_sync_uses_configured_limit() {
        let mut config = Config::default();
        config.fetch.cookie = Some("ct0=abc".into());
        config.fetch.limit = 40;

        let args = SyncArgs {
            source: SourceArgs::default(),
            ai: AiArgs::default(),
            vault: VaultArgs::default(),
        };

        let sync = sync_config(&ctx(config), &args).unwrap();
        assert_eq!(sync.cookie.as_deref(), Some("ct0=abc"));
        assert_eq!(sync.limit, Some(40));
    }
}
