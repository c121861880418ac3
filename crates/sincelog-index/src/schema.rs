use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Store Layout
//
// Tables follow the host CMS model: entries carry arbitrary key/value meta,
// terms are grouped by taxonomy and related to entries many-to-many, and terms
// carry their own key/value meta. The per-version change index is term meta.
//
// The store is always rebuildable from an import document, so a schema
// version mismatch drops everything instead of migrating.

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_type TEXT NOT NULL,
            title TEXT NOT NULL,
            UNIQUE (post_type, title)
        );

        CREATE TABLE IF NOT EXISTS entry_meta (
            entry_id INTEGER NOT NULL,
            meta_key TEXT NOT NULL,
            meta_value TEXT NOT NULL,
            PRIMARY KEY (entry_id, meta_key),
            FOREIGN KEY (entry_id) REFERENCES entries(id)
        );

        CREATE TABLE IF NOT EXISTS terms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            taxonomy TEXT NOT NULL,
            name TEXT NOT NULL,
            UNIQUE (taxonomy, name)
        );

        CREATE TABLE IF NOT EXISTS term_relationships (
            entry_id INTEGER NOT NULL,
            term_id INTEGER NOT NULL,
            PRIMARY KEY (entry_id, term_id),
            FOREIGN KEY (entry_id) REFERENCES entries(id),
            FOREIGN KEY (term_id) REFERENCES terms(id)
        );

        CREATE TABLE IF NOT EXISTS term_meta (
            term_id INTEGER NOT NULL,
            meta_key TEXT NOT NULL,
            meta_value TEXT NOT NULL,
            PRIMARY KEY (term_id, meta_key),
            FOREIGN KEY (term_id) REFERENCES terms(id)
        );

        CREATE TABLE IF NOT EXISTS options (
            name TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_order ON entries(post_type, title);
        CREATE INDEX IF NOT EXISTS idx_relationships_term ON term_relationships(term_id);
        CREATE INDEX IF NOT EXISTS idx_term_meta_key ON term_meta(meta_key);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS options;
        DROP TABLE IF EXISTS term_meta;
        DROP TABLE IF EXISTS term_relationships;
        DROP TABLE IF EXISTS terms;
        DROP TABLE IF EXISTS entry_meta;
        DROP TABLE IF EXISTS entries;
        "#,
    )?;
    Ok(())
}
