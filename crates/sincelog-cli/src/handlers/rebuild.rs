use crate::context::ExecutionContext;
use anyhow::Result;
use sincelog_engine::rebuild_change_index;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let db = ctx.db()?;
    let summary = rebuild_change_index(db)?;

    println!(
        "Rebuilt change index for {} versions ({} entries classified, {} skipped)",
        summary.versions, summary.classified, summary.skipped
    );
    Ok(())
}
