//! Integration tests for opening stores on disk
//!
//! These tests verify that SqliteStore::open persists values across reopen and
//! sets aside tables written by an unknown schema version instead of dropping them.

use rollcall_store::{KeyValueStore, SCHEMA_VERSION, SqliteStore};
use rusqlite::Connection;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_values_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("rollcall.db");

    {
        let mut store = SqliteStore::open(&db_path).unwrap();
        store
            .set("classes", &json!({"Math": {"students": {}, "created": "2024-09-01T08:00:00.000Z"}}))
            .unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(store.path(), Some(db_path.as_path()));
    let value = store.get("classes").unwrap().expect("value should persist");
    assert!(value.get("Math").is_some());
}

#[test]
fn test_fresh_database_gets_current_version() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rollcall.db");

    SqliteStore::open(&db_path).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn test_unknown_version_is_set_aside() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rollcall.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE kv (key TEXT PRIMARY KEY, blob BLOB);
            INSERT INTO kv (key, blob) VALUES ('classes', x'00');
            PRAGMA user_version = 99;
            "#,
        )
        .unwrap();
    }

    let mut store = SqliteStore::open(&db_path).unwrap();
    assert!(store.get("classes").unwrap().is_none());
    store.set("classes", &json!({})).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let old_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_v99", [], |row| row.get(0))
        .unwrap();
    assert_eq!(old_rows, 1);
}

fn write_legacy_kv(db_path: &std::path::Path, marker: &str) {
    let conn = Connection::open(db_path).unwrap();
    conn.execute_batch(&format!(
        r#"
        DROP TABLE IF EXISTS kv;
        CREATE TABLE kv (key TEXT PRIMARY KEY, blob BLOB);
        INSERT INTO kv (key, blob) VALUES ('{marker}', x'00');
        PRAGMA user_version = 99;
        "#
    ))
    .unwrap();
}

#[test]
fn test_repeat_migration_keeps_earlier_backup() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rollcall.db");

    write_legacy_kv(&db_path, "first");
    SqliteStore::open(&db_path).unwrap();

    write_legacy_kv(&db_path, "second");
    SqliteStore::open(&db_path).unwrap();

    write_legacy_kv(&db_path, "third");
    SqliteStore::open(&db_path).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let key_in = |table: &str| -> String {
        conn.query_row(&format!("SELECT key FROM {}", table), [], |row| row.get(0))
            .unwrap()
    };
    assert_eq!(key_in("kv_v99"), "first");
    assert_eq!(key_in("kv_v99_1"), "second");
    assert_eq!(key_in("kv_v99_2"), "third");
}

#[test]
fn test_corrupt_value_reports_json_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rollcall.db");

    SqliteStore::open(&db_path).unwrap();
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES ('classes', '{not json', 'now')",
            [],
        )
        .unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let err = store.get("classes").unwrap_err();
    assert!(err.to_string().starts_with("Stored value is not valid JSON"));
}
