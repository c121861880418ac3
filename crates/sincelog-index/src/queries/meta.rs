use rusqlite::{Connection, OptionalExtension, params};

use crate::Result;

pub fn get_entry_meta(conn: &Connection, entry_id: i64, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT meta_value FROM entry_meta WHERE entry_id = ?1 AND meta_key = ?2",
            params![entry_id, key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(value)
}

pub fn set_entry_meta(conn: &Connection, entry_id: i64, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO entry_meta (entry_id, meta_key, meta_value)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(entry_id, meta_key) DO UPDATE SET
            meta_value = ?3
        "#,
        params![entry_id, key, value],
    )?;

    Ok(())
}

pub fn delete_entry_meta(conn: &Connection, entry_id: i64, key: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM entry_meta WHERE entry_id = ?1 AND meta_key = ?2",
        params![entry_id, key],
    )?;

    Ok(())
}

pub fn get_term_meta(conn: &Connection, term_id: i64, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT meta_value FROM term_meta WHERE term_id = ?1 AND meta_key = ?2",
            params![term_id, key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(value)
}

pub fn set_term_meta(conn: &Connection, term_id: i64, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO term_meta (term_id, meta_key, meta_value)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(term_id, meta_key) DO UPDATE SET
            meta_value = ?3
        "#,
        params![term_id, key, value],
    )?;

    Ok(())
}

/// Delete a meta key from every term. Returns the number of rows removed.
pub fn delete_term_meta_by_key(conn: &Connection, key: &str) -> Result<usize> {
    let removed = conn.execute("DELETE FROM term_meta WHERE meta_key = ?1", [key])?;
    Ok(removed)
}

pub fn count_term_meta_by_key(conn: &Connection, key: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM term_meta WHERE meta_key = ?1",
        [key],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}
