use crate::context::ExecutionContext;
use anyhow::Result;
use sincelog_engine::{ReportOptions, generate_report, resolve_version};
use sincelog_types::{ChangeType, PostType};
use std::io::Write;

pub fn handle(
    ctx: &ExecutionContext,
    version: Option<String>,
    change_type: Option<ChangeType>,
    post_type: Option<PostType>,
) -> Result<()> {
    let db = ctx.db()?;
    let settings = ctx.config()?.report_settings();

    let version = resolve_version(version.as_deref(), db)?;
    let options = ReportOptions::new(version)
        .change_type(change_type)
        .post_type(post_type);

    let text = generate_report(db, &options, &settings)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
