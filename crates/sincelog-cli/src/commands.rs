use super::args::{Cli, Commands};
use super::handlers;
use crate::config::resolve_workspace_path;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir);

    match cli.command {
        Commands::Since {
            version,
            change_type,
            post_type,
        } => handlers::since::handle(&ctx, version, change_type.into(), post_type.into()),

        Commands::Import { file } => handlers::import::handle(&ctx, &file),

        Commands::Rebuild => handlers::rebuild::handle(&ctx),

        Commands::Versions => handlers::versions::handle(&ctx),
    }
}
