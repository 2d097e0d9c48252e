//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // cascade deletes from timesheets to their items
        conn.pragma_update(None, "foreign_keys", "ON")?;
        // concurrent writers wait for the IMMEDIATE lock instead of failing at once
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
