//! Persisted key-value preferences, the equivalent of a browser's local storage.
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::errors::StoreError;

/// Key under which the selected language code is stored.
pub const LANGUAGE_PREFERENCE_KEY: &str = "portfolio-lang";

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store that lives as long as the process. Mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk. The file is rewritten on every `set`.
///
/// Writes are synchronous, like the local storage this stands in for. The file holds a handful of short strings.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: FxHashMap<String, String>,
}

impl FileStore {
    /// Default location of the preferences file, relative to the site directory. The static server refuses hidden
    /// paths, so it is never served.
    pub const DEFAULT_PATH: &'static str = ".vitrine/preferences.json";

    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => FxHashMap::default(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self { path, values })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Serializing a map of strings cannot fail
        let contents = serde_json::to_vec_pretty(&self.values).unwrap_or_default();
        std::fs::write(&self.path, contents).map_err(write_err)
    }
}
