use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::traits::{Capybara, Storage};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

fn map_capybara_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Capybara> {
    Ok(Capybara {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn db_list_capybaras(conn: &Connection) -> rusqlite::Result<Vec<Capybara>> {
    let mut stmt = conn.prepare("SELECT id, name FROM capybaras ORDER BY id")?;
    let mapped = stmt
        .query_map([], map_capybara_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_load_capybara(conn: &Connection, id: i64) -> rusqlite::Result<Option<Capybara>> {
    conn.query_row(
        "SELECT id, name FROM capybaras WHERE id = ?1",
        params![id],
        map_capybara_row,
    )
    .optional()
}

fn db_insert_capybara(conn: &Connection, name: &str) -> rusqlite::Result<Capybara> {
    conn.execute("INSERT INTO capybaras (name) VALUES (?1)", params![name])?;
    Ok(Capybara {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

fn db_update_capybara(conn: &Connection, id: i64, name: &str) -> rusqlite::Result<Option<Capybara>> {
    conn.query_row(
        "UPDATE capybaras SET name = ?2 WHERE id = ?1 RETURNING id, name",
        params![id, name],
        map_capybara_row,
    )
    .optional()
}

fn db_delete_capybara(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let removed = conn.execute("DELETE FROM capybaras WHERE id = ?1", params![id])?;
    Ok(removed > 0)
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    /// Opens the database once so the schema is created or verified.
    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS capybaras (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) > 0)
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl Storage for SqliteStorage {
    fn list_capybaras(&self) -> Result<Vec<Capybara>> {
        self.with_conn(db_list_capybaras)
            .context("listing capybaras")
    }

    fn load_capybara(&self, id: i64) -> Result<Option<Capybara>> {
        self.with_conn(|conn| db_load_capybara(conn, id))
            .with_context(|| format!("loading capybara {id}"))
    }

    fn insert_capybara(&self, name: &str) -> Result<Capybara> {
        self.with_conn(|conn| db_insert_capybara(conn, name))
            .context("inserting capybara")
    }

    fn update_capybara(&self, id: i64, name: &str) -> Result<Option<Capybara>> {
        self.with_conn(|conn| db_update_capybara(conn, id, name))
            .with_context(|| format!("updating capybara {id}"))
    }

    fn delete_capybara(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| db_delete_capybara(conn, id))
            .with_context(|| format!("deleting capybara {id}"))
    }
}
