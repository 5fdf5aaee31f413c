//! Flat key-value persistence backends.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Minimal settings-style store: integers default to `0`, strings to `None`.
///
/// Setters only touch memory; [`flush`](KeyValueStore::flush) persists.
pub trait KeyValueStore: Send {
    fn integer(&self, key: &str) -> u64;
    fn string(&self, key: &str) -> Option<String>;
    fn set_integer(&mut self, key: &str, value: u64);
    fn set_string(&mut self, key: &str, value: &str);
    fn flush(&mut self) -> io::Result<()>;
}

/// Non-persistent store, handy for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn integer(&self, key: &str) -> u64 {
        self.values.get(key).and_then(Value::as_u64).unwrap_or(0)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set_integer(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Store persisted as one flat JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<HashMap<String, Value>>(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        tracing::debug!("Opened statistics file {} ({} entries)", path.display(), values.len());

        Ok(Self {
            path,
            cache: MemoryStore { values },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn integer(&self, key: &str) -> u64 {
        self.cache.integer(key)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.cache.string(key)
    }

    fn set_integer(&mut self, key: &str, value: u64) {
        self.cache.set_integer(key, value);
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.cache.set_string(key, value);
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&self.cache.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Atomic replace.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("movie-quiz-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("stats.json")
    }

    #[test]
    fn test_memory_store_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.integer("games_count"), 0);
        assert_eq!(store.string("best_game_date"), None);
    }

    #[test]
    fn test_json_file_store_round_trips_through_disk() {
        let path = scratch_path("roundtrip");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set_integer("games_count", 3);
            store.set_string("best_game_date", "01.02.25 10:00");
            store.flush().unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.integer("games_count"), 3);
        assert_eq!(reopened.string("best_game_date").as_deref(), Some("01.02.25 10:00"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unflushed_writes_are_not_persisted() {
        let path = scratch_path("unflushed");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set_integer("games_count", 9);
        }
        assert_eq!(JsonFileStore::open(&path).unwrap().integer("games_count"), 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
