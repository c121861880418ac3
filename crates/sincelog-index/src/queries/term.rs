use rusqlite::{Connection, OptionalExtension, Row, params};
use sincelog_types::Taxonomy;

use crate::{Result, records::TermRecord};

fn to_record(row: &Row<'_>) -> rusqlite::Result<TermRecord> {
    Ok(TermRecord {
        id: row.get(0)?,
        taxonomy: row.get(1)?,
        name: row.get(2)?,
    })
}

pub fn find(conn: &Connection, taxonomy: Taxonomy, name: &str) -> Result<Option<TermRecord>> {
    let result = conn
        .query_row(
            r#"
            SELECT id, taxonomy, name
            FROM terms
            WHERE taxonomy = ?1 AND name = ?2
            "#,
            params![taxonomy.as_str(), name],
            to_record,
        )
        .optional()?;

    Ok(result)
}

pub fn get_or_insert(conn: &Connection, taxonomy: Taxonomy, name: &str) -> Result<TermRecord> {
    conn.execute(
        r#"
        INSERT INTO terms (taxonomy, name)
        VALUES (?1, ?2)
        ON CONFLICT(taxonomy, name) DO NOTHING
        "#,
        params![taxonomy.as_str(), name],
    )?;

    let term = conn.query_row(
        "SELECT id, taxonomy, name FROM terms WHERE taxonomy = ?1 AND name = ?2",
        params![taxonomy.as_str(), name],
        to_record,
    )?;

    Ok(term)
}

/// All terms of a taxonomy, ordered by name.
pub fn list(conn: &Connection, taxonomy: Taxonomy) -> Result<Vec<TermRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, taxonomy, name
        FROM terms
        WHERE taxonomy = ?1
        ORDER BY name ASC
        "#,
    )?;

    let terms = stmt
        .query_map([taxonomy.as_str()], to_record)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(terms)
}

pub fn attach(conn: &Connection, entry_id: i64, term_id: i64) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO term_relationships (entry_id, term_id)
        VALUES (?1, ?2)
        ON CONFLICT(entry_id, term_id) DO NOTHING
        "#,
        params![entry_id, term_id],
    )?;

    Ok(())
}

/// Remove every relation between an entry and terms of one taxonomy.
pub fn detach_taxonomy(conn: &Connection, entry_id: i64, taxonomy: Taxonomy) -> Result<()> {
    conn.execute(
        r#"
        DELETE FROM term_relationships
        WHERE entry_id = ?1
          AND term_id IN (SELECT id FROM terms WHERE taxonomy = ?2)
        "#,
        params![entry_id, taxonomy.as_str()],
    )?;

    Ok(())
}

/// Terms of one taxonomy related to an entry, ordered by name.
pub fn for_entry(conn: &Connection, entry_id: i64, taxonomy: Taxonomy) -> Result<Vec<TermRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.id, t.taxonomy, t.name
        FROM terms t
        JOIN term_relationships r ON r.term_id = t.id
        WHERE r.entry_id = ?1 AND t.taxonomy = ?2
        ORDER BY t.name ASC
        "#,
    )?;

    let terms = stmt
        .query_map(params![entry_id, taxonomy.as_str()], to_record)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(terms)
}
