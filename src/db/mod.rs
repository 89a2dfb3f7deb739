use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const SCHEMA_SQL: &str = include_str!("schema.sql");

pub const PAINTING_TABLE_KEY: &str = "paintingTableModels";
pub const RECENT_VIEW_SETTINGS_KEY: &str = "recentViewSettings";

/// Durable local storage holding JSON blobs under string keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Database {
    pub fn new(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AppError::Io(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(AppError::from)?;
        conn.execute_batch(SCHEMA_SQL).map_err(AppError::from)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("database mutex poisoned".to_string()))
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.lock()?;
        let raw = conn
            .query_row(
                "SELECT value_json FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_store (key, value_json, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Process-local store used when the database cannot be opened, and in tests.
/// `set_failing(true)` makes every call fail the way an unavailable or full
/// disk would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Storage("memory store unavailable".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal("memory store mutex poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check_available()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.check_available()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Database, KeyValueStore, MemoryStore};

    #[test]
    fn database_upserts_and_reads_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("nested").join("catalog.db");
        let db = Database::new(&db_path).expect("db");
        assert!(db.path().exists());

        assert_eq!(db.get("missing").expect("get"), None);
        db.set("k", "[1]").expect("set");
        db.set("k", "[2]").expect("overwrite");
        assert_eq!(db.get("k").expect("get").as_deref(), Some("[2]"));
    }

    #[test]
    fn database_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("catalog.db");
        {
            let db = Database::new(&db_path).expect("db");
            db.set("recentViewSettings", "{}").expect("set");
        }
        let reopened = Database::new(&db_path).expect("reopen");
        assert_eq!(
            reopened.get("recentViewSettings").expect("get").as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn failing_memory_store_rejects_reads_and_writes() {
        let store = MemoryStore::new();
        store.set("k", "v").expect("set");
        store.set_failing(true);
        assert!(store.get("k").is_err());
        assert!(store.set("k", "w").is_err());
        store.set_failing(false);
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
    }
}
