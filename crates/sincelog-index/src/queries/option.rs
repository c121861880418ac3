use rusqlite::{Connection, OptionalExtension, params};

use crate::Result;

pub fn get(conn: &Connection, name: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM options WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;

    Ok(value)
}

pub fn set(conn: &Connection, name: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO options (name, value)
        VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET
            value = ?2
        "#,
        params![name, value],
    )?;

    Ok(())
}
