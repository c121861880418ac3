use rusqlite::Connection;
use sincelog_types::{DocEntry, DocTag, PostType, Taxonomy};
use std::path::Path;

use crate::{
    Result,
    queries::{entry, meta, option, term},
    records::{EntryRecord, TermRecord},
    schema,
};

/// Entry meta key holding the JSON-encoded doc tags.
pub const TAGS_META_KEY: &str = "tags";
/// Entry meta key holding the ticket number.
pub const TICKET_META_KEY: &str = "ticket_number";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        schema::init_schema(&db.conn)?;
        Ok(db)
    }

    /// Run `f` inside a single transaction; rolled back if it fails.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.conn.execute_batch("BEGIN")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    // Entry operations

    pub fn upsert_entry(&self, post_type: PostType, title: &str) -> Result<i64> {
        entry::upsert(&self.conn, post_type, title)
    }

    pub fn get_entry(&self, id: i64) -> Result<Option<EntryRecord>> {
        entry::get(&self.conn, id)
    }

    pub fn count_entries(&self) -> Result<usize> {
        entry::count(&self.conn)
    }

    pub fn entry_ids_for_term(&self, term_id: i64, post_type: Option<PostType>) -> Result<Vec<i64>> {
        entry::ids_for_term(&self.conn, term_id, post_type)
    }

    pub fn entry_ids_with_taxonomy(&self, taxonomy: Taxonomy) -> Result<Vec<i64>> {
        entry::ids_with_taxonomy(&self.conn, taxonomy)
    }

    /// Fully populated entry: row, tags, ticket, packages and source file.
    pub fn load_entry(&self, id: i64) -> Result<Option<DocEntry>> {
        match entry::get(&self.conn, id)? {
            Some(record) => Ok(Some(self.hydrate(record)?)),
            None => Ok(None),
        }
    }

    /// Fully populated entries, ordered by post type then title.
    pub fn load_entries(&self, ids: &[i64]) -> Result<Vec<DocEntry>> {
        entry::list_by_ids(&self.conn, ids)?
            .into_iter()
            .map(|record| self.hydrate(record))
            .collect()
    }

    fn hydrate(&self, record: EntryRecord) -> Result<DocEntry> {
        let packages = term::for_entry(&self.conn, record.id, Taxonomy::Package)?
            .into_iter()
            .map(|t| t.name)
            .collect();
        let source_file = term::for_entry(&self.conn, record.id, Taxonomy::SourceFile)?
            .into_iter()
            .next()
            .map(|t| t.name);

        Ok(DocEntry {
            id: record.id,
            post_type: record.post_type,
            title: record.title,
            packages,
            source_file,
            ticket: self.entry_ticket(record.id)?,
            tags: self.entry_tags(record.id)?,
        })
    }

    // Entry meta

    pub fn get_entry_meta(&self, entry_id: i64, key: &str) -> Result<Option<String>> {
        meta::get_entry_meta(&self.conn, entry_id, key)
    }

    pub fn set_entry_meta(&self, entry_id: i64, key: &str, value: &str) -> Result<()> {
        meta::set_entry_meta(&self.conn, entry_id, key, value)
    }

    pub fn delete_entry_meta(&self, entry_id: i64, key: &str) -> Result<()> {
        meta::delete_entry_meta(&self.conn, entry_id, key)
    }

    /// Stored doc tags; an entry without tag meta has none.
    pub fn entry_tags(&self, entry_id: i64) -> Result<Vec<DocTag>> {
        match self.get_entry_meta(entry_id, TAGS_META_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn set_entry_tags(&self, entry_id: i64, tags: &[DocTag]) -> Result<()> {
        let raw = serde_json::to_string(tags)?;
        self.set_entry_meta(entry_id, TAGS_META_KEY, &raw)
    }

    pub fn entry_ticket(&self, entry_id: i64) -> Result<Option<String>> {
        Ok(self
            .get_entry_meta(entry_id, TICKET_META_KEY)?
            .filter(|t| !t.trim().is_empty()))
    }

    // Terms

    pub fn find_term(&self, taxonomy: Taxonomy, name: &str) -> Result<Option<TermRecord>> {
        term::find(&self.conn, taxonomy, name)
    }

    pub fn get_or_insert_term(&self, taxonomy: Taxonomy, name: &str) -> Result<TermRecord> {
        term::get_or_insert(&self.conn, taxonomy, name)
    }

    pub fn list_terms(&self, taxonomy: Taxonomy) -> Result<Vec<TermRecord>> {
        term::list(&self.conn, taxonomy)
    }

    pub fn attach_term(&self, entry_id: i64, term_id: i64) -> Result<()> {
        term::attach(&self.conn, entry_id, term_id)
    }

    pub fn detach_taxonomy(&self, entry_id: i64, taxonomy: Taxonomy) -> Result<()> {
        term::detach_taxonomy(&self.conn, entry_id, taxonomy)
    }

    pub fn entry_terms(&self, entry_id: i64, taxonomy: Taxonomy) -> Result<Vec<TermRecord>> {
        term::for_entry(&self.conn, entry_id, taxonomy)
    }

    // Term meta

    pub fn get_term_meta(&self, term_id: i64, key: &str) -> Result<Option<String>> {
        meta::get_term_meta(&self.conn, term_id, key)
    }

    pub fn set_term_meta(&self, term_id: i64, key: &str, value: &str) -> Result<()> {
        meta::set_term_meta(&self.conn, term_id, key, value)
    }

    pub fn delete_term_meta_by_key(&self, key: &str) -> Result<usize> {
        meta::delete_term_meta_by_key(&self.conn, key)
    }

    pub fn count_term_meta_by_key(&self, key: &str) -> Result<usize> {
        meta::count_term_meta_by_key(&self.conn, key)
    }

    // Site options

    pub fn get_option(&self, name: &str) -> Result<Option<String>> {
        option::get(&self.conn, name)
    }

    pub fn set_option(&self, name: &str, value: &str) -> Result<()> {
        option::set(&self.conn, name, value)
    }
}
