//! Obsidian vault generation.
//!
//! Layout:
//!
//! ```text
//! <output>/_index.md              vault root index
//! <output>/<dir>/_index.md        category index
//! <output>/<dir>/<handle>-<id>.md one note per bookmark
//! ```
//!
//! Notes are overwritten in place on re-runs, indexes are regenerated, and nothing else
//! in the output directory is touched.

pub mod sanitize;
pub mod templates;

pub use sanitize::sanitize_path;

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::error::{VaultError, VaultResult};
use crate::types::classified::ClassifiedBookmark;
use crate::types::vault::{GenerateResult, VaultOptions};
use templates::IndexEntry;

const INDEX_FILE: &str = "_index.md";

/// Items that land in one directory. Categories that sanitize to the same name share one.
struct DirGroup<'a> {
    /// First category string seen for this directory
    title: &'a str,
    items: Vec<&'a ClassifiedBookmark>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VaultGenerator;

impl VaultGenerator {
    pub fn new() -> Self {
        Self
    }

    pub async fn generate(
        &self,
        items: &[ClassifiedBookmark],
        options: &VaultOptions,
    ) -> VaultResult<GenerateResult> {
        let output_dir = options.output_dir.as_path();
        create_dir(output_dir).await?;

        let mut categories: IndexSet<&str> = IndexSet::new();
        let mut groups: IndexMap<String, DirGroup<'_>> = IndexMap::new();
        for item in items {
            categories.insert(item.category.as_str());
            groups
                .entry(sanitize_path(&item.category))
                .or_insert_with(|| DirGroup {
                    title: item.category.as_str(),
                    items: Vec::new(),
                })
                .items
                .push(item);
        }

        let mut files_created = 0;

        for (dir, group) in &groups {
            let category_dir = output_dir.join(dir);
            create_dir(&category_dir).await?;

            for item in &group.items {
                let stem = templates::note_stem(&item.bookmark);
                let path = category_dir.join(format!("{}.md", stem));
                let content = templates::render_bookmark(item, options.include_media);
                write_file(&path, &content).await?;
                files_created += 1;
            }

            if options.create_index {
                let content = templates::render_category_index(group.title, &group.items);
                write_file(&category_dir.join(INDEX_FILE), &content).await?;
                files_created += 1;
            }
        }

        if options.create_index {
            let entries: Vec<IndexEntry<'_>> = groups
                .iter()
                .map(|(dir, group)| IndexEntry {
                    dir: dir.as_str(),
                    title: group.title,
                    count: group.items.len(),
                })
                .collect();
            let content = templates::render_root_index(&options.vault_name, &entries);
            write_file(&output_dir.join(INDEX_FILE), &content).await?;
            files_created += 1;
        }

        info!(
            output_dir = %output_dir.display(),
            files_created,
            categories = categories.len(),
            "Vault generated"
        );

        Ok(GenerateResult {
            files_created,
            categories_created: categories.into_iter().map(str::to_string).collect(),
            output_dir: output_dir.to_path_buf(),
        })
    }
}

async fn create_dir(path: &Path) -> VaultResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| VaultError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_file(path: &Path, content: &str) -> VaultResult<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| VaultError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}
