use crate::errors::AppResult;
use crate::models::theme::Theme;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_theme(row: &Row) -> rusqlite::Result<Theme> {
    Ok(Theme {
        theme_id: row.get("theme_id")?,
        theme_name: row.get("theme_name")?,
        variables: row.get("variables")?,
    })
}

pub fn list_themes(conn: &Connection) -> AppResult<Vec<Theme>> {
    let mut stmt = conn.prepare("SELECT theme_id, theme_name, variables FROM themes ORDER BY theme_id ASC")?;
    let rows = stmt.query_map([], map_theme)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_theme_by_name(conn: &Connection, name: &str) -> AppResult<Option<Theme>> {
    Ok(conn
        .query_row(
            "SELECT theme_id, theme_name, variables FROM themes WHERE theme_name = ?1",
            [name],
            map_theme,
        )
        .optional()?)
}

/// Replace the JSON variables of a theme. Returns false when no theme has
/// that name.
pub fn update_theme_variables(conn: &Connection, name: &str, variables: &str) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE themes SET variables = ?1 WHERE theme_name = ?2",
        params![variables, name],
    )?;
    Ok(n > 0)
}

pub fn insert_theme(conn: &Connection, name: &str, variables: Option<&str>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO themes (theme_name, variables) VALUES (?1, ?2)",
        params![name, variables],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Drop one cached value. Returns the number of removed entries.
pub fn invalidate_cache_entry(conn: &Connection, namespace: &str, key: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM cache_entries WHERE namespace = ?1 AND key = ?2",
        params![namespace, key],
    )?)
}

pub fn put_cache_entry(conn: &Connection, namespace: &str, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO cache_entries (namespace, key, value) VALUES (?1, ?2, ?3)
         ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value",
        params![namespace, key, value],
    )?;
    Ok(())
}

pub fn cache_entry(conn: &Connection, namespace: &str, key: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM cache_entries WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
            |row| row.get(0),
        )
        .optional()?
        .flatten())
}
