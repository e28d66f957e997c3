use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, Result, schema};

/// SQLite-backed key-value store.
///
/// Each key maps to one JSON document stored as text; `set` replaces it in a
/// single statement.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        schema::init_schema(&conn)?;

        Ok(Self {
            conn,
            path: Some(db_path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Database file, or `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Last time `key` was written (RFC 3339), if present
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let updated = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3
            "#,
            params![key, text, now],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("classes").unwrap().is_none());
        assert!(store.updated_at("classes").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("classes", &json!({"Math": {"a": 1}})).unwrap();
        store.set("classes", &json!({"Art": {}})).unwrap();

        assert_eq!(store.get("classes").unwrap(), Some(json!({"Art": {}})));
        assert!(store.updated_at("classes").unwrap().is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("a", &json!(1)).unwrap();
        store.set("b", &json!(2)).unwrap();

        assert_eq!(store.get("a").unwrap(), Some(json!(1)));
        assert_eq!(store.get("b").unwrap(), Some(json!(2)));
    }
}
