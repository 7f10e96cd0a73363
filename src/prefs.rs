use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

use crate::model::dictionary::ViewPreferences;
use crate::SortMode;

/// Key for the dictionary list filter text
pub const KEY_DICT_FILTER: &str = "talkoo_dict_filter";
/// Key for the dictionary list sort mode
pub const KEY_DICT_SORT: &str = "talkoo_dict_sort";

/// Per-installation key/value store for view preferences.
///
/// Values never expire and carry no schema version.
pub struct PrefsStore {
    conn: Connection,
}

impl PrefsStore {
    pub fn new() -> Result<Self> {
        let dir = Self::get_store_dir();
        std::fs::create_dir_all(&dir)?;

        let conn = Connection::open(dir.join("prefs.db"))?;
        let store = PrefsStore { conn };
        store.init_schema()?;

        Ok(store)
    }

    pub fn new_in_memory() -> Result<Self> {
        let store = PrefsStore {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn get_store_dir() -> PathBuf {
        match dirs::cache_dir() {
            Some(dir) => dir.join("talkoo-tui"),
            None => std::env::temp_dir().join("talkoo-tui"),
        }
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;",
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read the stored filter and sort mode.
    ///
    /// Read errors degrade to defaults; the filter is trimmed.
    pub fn load_view_preferences(&self) -> ViewPreferences {
        let filter_text = match self.get(KEY_DICT_FILTER) {
            Ok(value) => value.unwrap_or_default().trim().to_string(),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", KEY_DICT_FILTER, e);
                String::new()
            }
        };

        let sort_mode = match self.get(KEY_DICT_SORT) {
            Ok(value) => value
                .map(|v| SortMode::from_storage_key(&v))
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", KEY_DICT_SORT, e);
                SortMode::default()
            }
        };

        ViewPreferences {
            filter_text,
            sort_mode,
        }
    }

    pub fn save_view_preferences(&self, prefs: &ViewPreferences) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![KEY_DICT_FILTER, prefs.filter_text],
        )?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![KEY_DICT_SORT, prefs.sort_mode.storage_key()],
        )?;
        tx.commit()?;
        Ok(())
    }
}
