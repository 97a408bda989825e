//! Durable backend: one JSON file per key.
//!
//! ```text
//! .deduce/cache/
//! ├── _cache_codeID_intro__type_html.json
//! ├── _cache_codeID_intro__type_text.json
//! └── _cache_context_codeID_intro.json
//! ```
//!
//! Keys are percent-encoded into file names, so any key maps to a single
//! file inside the cache directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::Storage;
use crate::cache::CacheError;

/// Everything but `[A-Za-z0-9_-]` is encoded.
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", utf8_percent_encode(key, FILE_NAME)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(path, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io(self.dir.clone(), e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| CacheError::Io(path, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, CacheError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::Io(path, e)),
        }
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| CacheError::Io(self.dir.clone(), e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");

        let mut storage = FileStorage::new(&cache_dir);
        storage.set_item("_cache_codeID_a", "{}").unwrap();

        let reopened = FileStorage::new(&cache_dir);
        assert_eq!(
            reopened.get_item("_cache_codeID_a").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_missing_key() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("never-created"));

        assert_eq!(storage.get_item("nope").unwrap(), None);
        assert!(!storage.remove_item("nope").unwrap());
        storage.clear().unwrap();
    }

    #[test]
    fn test_keys_stay_inside_directory() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("../escape/key", "x").unwrap();
        let name = storage.path_for("../escape/key");

        assert_eq!(name.parent(), Some(dir.path()));
        assert_eq!(storage.get_item("../escape/key").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("c"));
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        assert!(storage.remove_item("a").unwrap());
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.clear().unwrap();
        assert!(!storage.dir().exists());
        assert_eq!(storage.get_item("b").unwrap(), None);
    }
}
