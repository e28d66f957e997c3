use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != 0 && current_version != SCHEMA_VERSION {
        migrate(conn, current_version)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

// The kv table holds user data, so unknown layouts are set aside rather than dropped.
// Earlier backups are never replaced: a repeat migration picks the next free suffix.
fn migrate(conn: &Connection, from_version: i32) -> Result<()> {
    if !table_exists(conn, "kv")? {
        return Ok(());
    }

    let base = format!("kv_v{}", from_version);
    let mut backup = base.clone();
    let mut attempt = 1;
    while table_exists(conn, &backup)? {
        backup = format!("{}_{}", base, attempt);
        attempt += 1;
    }

    conn.execute_batch(&format!("ALTER TABLE kv RENAME TO {};", backup))?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}
