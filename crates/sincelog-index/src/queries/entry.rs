use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter, types::Type};
use sincelog_types::{PostType, Taxonomy};

use crate::{Result, records::EntryRecord};

fn post_type_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<PostType> {
    let raw: String = row.get(idx)?;
    raw.parse::<PostType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn to_record(row: &Row<'_>) -> rusqlite::Result<EntryRecord> {
    Ok(EntryRecord {
        id: row.get(0)?,
        post_type: post_type_at(row, 1)?,
        title: row.get(2)?,
    })
}

/// Insert an entry, or find the existing one with the same post type and title.
pub fn upsert(conn: &Connection, post_type: PostType, title: &str) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO entries (post_type, title)
        VALUES (?1, ?2)
        ON CONFLICT(post_type, title) DO NOTHING
        "#,
        params![post_type.as_str(), title],
    )?;

    let id = conn.query_row(
        "SELECT id FROM entries WHERE post_type = ?1 AND title = ?2",
        params![post_type.as_str(), title],
        |row| row.get(0),
    )?;

    Ok(id)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<EntryRecord>> {
    let result = conn
        .query_row(
            r#"
            SELECT id, post_type, title
            FROM entries
            WHERE id = ?1
            "#,
            [id],
            to_record,
        )
        .optional()?;

    Ok(result)
}

/// Ids bound per `IN (...)` query, kept well under SQLite's variable limit.
const IDS_PER_QUERY: usize = 500;

/// Entries for a set of ids, ordered by post type then title.
pub fn list_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<EntryRecord>> {
    let mut entries = Vec::with_capacity(ids.len());

    for chunk in ids.chunks(IDS_PER_QUERY) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let query = format!(
            r#"
            SELECT id, post_type, title
            FROM entries
            WHERE id IN ({})
            "#,
            placeholders
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map(params_from_iter(chunk.iter()), to_record)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        entries.extend(rows);
    }

    // PostType orders like its stored name; titles compare bytewise like SQLite's BINARY.
    entries.sort_by(|a, b| {
        (a.post_type, &a.title, a.id).cmp(&(b.post_type, &b.title, b.id))
    });
    entries.dedup_by_key(|e| e.id);

    Ok(entries)
}

/// Ids of entries related to a term, optionally of one post type.
pub fn ids_for_term(
    conn: &Connection,
    term_id: i64,
    post_type: Option<PostType>,
) -> Result<Vec<i64>> {
    let mut where_clauses = vec!["r.term_id = ?"];
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(term_id)];

    if let Some(post_type) = post_type {
        where_clauses.push("e.post_type = ?");
        params.push(Box::new(post_type.as_str()));
    }

    let query = format!(
        r#"
        SELECT e.id
        FROM entries e
        JOIN term_relationships r ON r.entry_id = e.id
        WHERE {}
        ORDER BY e.id ASC
        "#,
        where_clauses.join(" AND ")
    );

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let ids = stmt
        .query_map(param_refs.as_slice(), |row| row.get(0))?
        .collect::<std::result::Result<Vec<i64>, rusqlite::Error>>()?;

    Ok(ids)
}

/// Ids of entries related to at least one term of a taxonomy.
pub fn ids_with_taxonomy(conn: &Connection, taxonomy: Taxonomy) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT DISTINCT r.entry_id
        FROM term_relationships r
        JOIN terms t ON t.id = r.term_id
        WHERE t.taxonomy = ?1
        ORDER BY r.entry_id ASC
        "#,
    )?;

    let ids = stmt
        .query_map([taxonomy.as_str()], |row| row.get(0))?
        .collect::<std::result::Result<Vec<i64>, rusqlite::Error>>()?;

    Ok(ids)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
    Ok(count as usize)
}
