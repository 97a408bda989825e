use rustc_hash::FxHashMap;

use super::Storage;
use crate::cache::CacheError;

/// In-process map; nothing outlives the cache.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: FxHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, CacheError> {
        Ok(self.items.remove(key).is_some())
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        self.items.clear();
        Ok(())
    }
}
