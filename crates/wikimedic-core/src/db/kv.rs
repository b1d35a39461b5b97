//! String-keyed storage.

use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use super::{Database, DbResult};

impl Database {
    /// Raw value stored under `key`.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM key_value WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_value(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO key_value (key, value, updated_at) VALUES (?, ?, datetime('now'))",
            params![key, value],
        )?;
        Ok(())
    }

    /// Returns whether anything was removed.
    pub fn remove_value(&self, key: &str) -> DbResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM key_value WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_value(key, &raw)
    }
}
