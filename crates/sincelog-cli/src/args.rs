use crate::types::{ChangeTypeFilter, LogLevel, PostTypeFilter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sincelog")]
#[command(about = "List what changed in a release of a documented code base", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Data directory (default: $SINCELOG_PATH, then the XDG data dir)")]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List changes in a version")]
    Since {
        #[arg(help = "Version to list changes for (default: the current version)")]
        version: Option<String>,

        #[arg(long = "change_type", visible_alias = "change-type", default_value = "any")]
        change_type: ChangeTypeFilter,

        #[arg(long = "post_type", visible_alias = "post-type", default_value = "any")]
        post_type: PostTypeFilter,
    },

    #[command(about = "Import parsed documentation from a JSON document")]
    Import { file: PathBuf },

    #[command(about = "Rebuild the per-version change index")]
    Rebuild,

    #[command(about = "List known versions")]
    Versions,
}
