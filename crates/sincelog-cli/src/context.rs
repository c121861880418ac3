use crate::config::Config;
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use sincelog_index::Database;
use std::path::{Path, PathBuf};

pub const DATABASE_FILE: &str = "sincelog.db";
pub const CONFIG_FILE: &str = "config.toml";

pub struct ExecutionContext {
    data_dir: PathBuf,
    db: OnceCell<Database>,
    config: OnceCell<Config>,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            db: OnceCell::new(),
            config: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// The existing store. Fails if nothing has been imported yet.
    pub fn db(&self) -> Result<&Database> {
        self.db.get_or_try_init(|| {
            let db_path = self.db_path();
            if !db_path.exists() {
                return Err(sincelog_engine::Error::NotInitialized(format!(
                    "no store at {}. Run `sincelog import <file>` first",
                    db_path.display()
                ))
                .into());
            }
            Ok(Database::open(&db_path)?)
        })
    }

    /// The store, created along with the data directory if missing.
    pub fn db_or_create(&self) -> Result<&Database> {
        self.db.get_or_try_init(|| {
            std::fs::create_dir_all(&self.data_dir).with_context(|| {
                format!("Failed to create data dir: {}", self.data_dir.display())
            })?;
            Ok(Database::open(&self.db_path())?)
        })
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.data_dir.join(CONFIG_FILE)))
    }
}
