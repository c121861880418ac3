use crate::context::ExecutionContext;
use anyhow::Result;
use sincelog_engine::{IMPORTED_AT_OPTION, VersionSummary, current_version, version_summaries};

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let db = ctx.db()?;
    let current = current_version(db)?;
    let summaries = version_summaries(db)?;

    if summaries.is_empty() {
        println!("No versions.");
    }

    for summary in &summaries {
        let marker = if current.as_deref() == Some(summary.version.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, format_counts(summary));
    }

    if let Some(imported_at) = db.get_option(IMPORTED_AT_OPTION)? {
        println!("Last import: {}", imported_at);
    }
    Ok(())
}

fn format_counts(summary: &VersionSummary) -> String {
    if !summary.indexed {
        return format!("{}\t(not indexed)", summary.version);
    }
    format!(
        "{}\t{} introduced, {} modified, {} deprecated",
        summary.version, summary.introduced, summary.modified, summary.deprecated
    )
}
