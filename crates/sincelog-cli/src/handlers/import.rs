use crate::context::ExecutionContext;
use anyhow::{Context, Result};
use sincelog_engine::{ImportProgress, Importer};
use sincelog_types::ImportDocument;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import document: {}", file.display()))?;
    let document = ImportDocument::from_json(&raw)
        .with_context(|| format!("Failed to parse import document: {}", file.display()))?;

    let db = ctx.db_or_create()?;
    let importer = Importer::with_default_observers(db);

    importer.run(&document, |progress| match progress {
        ImportProgress::EntryImported {
            entry_id,
            post_type,
            title,
        } => {
            tracing::debug!(entry_id, %post_type, %title, "imported");
        }
        ImportProgress::Finished { entries, version } => match version {
            Some(version) => println!("Imported {} entries (current version {})", entries, version),
            None => println!("Imported {} entries", entries),
        },
    })?;

    Ok(())
}
