//! Settings persistence.
//!
//! The only durable state the game keeps is a single named integer (the
//! high score). `SettingsStore` is the seam the session talks through;
//! embedders provide whatever backing they have. Two implementations
//! ship: an in-memory store for tests and embedding, and a small
//! JSON-file store for standalone use.
//!
//! Writes are synchronous and fire-and-forget: a failed file write is
//! logged and swallowed, never surfaced to gameplay.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Key-value settings persistence.
pub trait SettingsStore {
    /// Read an integer, returning `default` if the key is absent.
    fn get_int(&self, key: &str, default: i64) -> i64;

    /// Write an integer.
    fn set_int(&mut self, key: &str, value: i64);
}

/// In-memory settings store. Nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, i64>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON-file-backed settings store.
///
/// The whole map is rewritten on every `set_int`; with one integer to
/// persist that is plenty. Load failures (missing file, bad JSON)
/// degrade to defaults with a warning.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: FxHashMap<String, i64>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing values if present.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(err) => {
                    warn!(path = %path.display(), %err, "settings file unreadable; starting fresh");
                    FxHashMap::default()
                }
            },
            Err(_) => FxHashMap::default(),
        };
        Self { path, values }
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "could not serialize settings");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "could not write settings file");
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int("HighScore", 0), 0);
        assert_eq!(store.get_int("HighScore", 99), 99);
    }

    #[test]
    fn test_memory_store_set_get() {
        let mut store = MemoryStore::new();
        store.set_int("HighScore", 120);
        assert_eq!(store.get_int("HighScore", 0), 120);

        store.set_int("HighScore", 80);
        assert_eq!(store.get_int("HighScore", 0), 80);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        {
            let mut store = JsonFileStore::open(&path);
            store.set_int("HighScore", 120);
        }

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("HighScore", 0), 120);
    }

    #[test]
    fn test_json_store_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json"));
        assert_eq!(store.get_int("HighScore", 0), 0);
    }

    #[test]
    fn test_json_store_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("HighScore", 7), 7);
    }
}
