// SQLite document store
// Entries, taxonomy terms and their metadata, modelled on the host CMS tables

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::{Database, TAGS_META_KEY, TICKET_META_KEY};
pub use error::{Error, Result};
pub use records::{EntryRecord, TermRecord};
pub use schema::SCHEMA_VERSION;
