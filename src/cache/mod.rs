//! Snippet cache: TTL entries over a pluggable key/value backend.
//!
//! # Module Structure
//!
//! ```text
//! cache/
//! ├── key        # Attributes and derived storage keys
//! ├── entry      # CacheEntry {data, ttl, createdAt}
//! ├── event      # CacheAdded / CacheRemoved subscriptions
//! ├── storage/   # Storage trait, FileStorage, MemoryStorage
//! └── mod.rs     # SnippetCache (this file)
//! ```
//!
//! # Layout in storage
//!
//! | Key                                  | Value                          |
//! |--------------------------------------|--------------------------------|
//! | `<prefix>_<k1>_<v1>__<k2>_<v2>`      | JSON `CacheEntry`              |
//! | `<prefix>_context_<name>_<value>`    | JSON array of entry keys       |
//!
//! Expired entries are only removed when read; there is no sweeper.

mod entry;
mod event;
mod key;
pub mod storage;

pub use entry::{CacheEntry, DEFAULT_TTL, current_timestamp};
pub use event::{CacheEvent, EventKind, SubscriptionId};
pub use key::{Attributes, DEFAULT_PREFIX, generate_context_key, generate_key};
pub use storage::{Backend, FileStorage, MemoryStorage, Storage};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CacheConfig;
use crate::debug;
use event::Subscribers;

/// Cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("cache entry serialization error")]
    Json(#[from] serde_json::Error),
}

type Clock = Box<dyn Fn() -> u64 + Send>;

/// TTL cache with context indices and event notification.
///
/// All methods take `&mut self`: the cache is owned by one task and never
/// shared, so the backend needs no locking.
pub struct SnippetCache {
    storage: Box<dyn Storage>,
    prefix: String,
    default_ttl: u64,
    clock: Clock,
    subscribers: Subscribers,
}

impl SnippetCache {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            prefix: DEFAULT_PREFIX.to_string(),
            default_ttl: DEFAULT_TTL,
            clock: Box::new(current_timestamp),
            subscribers: Subscribers::default(),
        }
    }

    pub fn memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    pub fn durable(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStorage::new(dir)))
    }

    /// Build the cache described by `[cache]`, resolving `dir` against `root`.
    pub fn open(config: &CacheConfig, root: &Path) -> Self {
        let cache = match config.backend {
            Backend::Durable => Self::durable(root.join(&config.dir)),
            Backend::Memory => Self::memory(),
        };
        cache
            .with_prefix(config.prefix.clone())
            .with_default_ttl(config.default_ttl)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_default_ttl(mut self, ttl: u64) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Replace the time source (Unix seconds).
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn generate_key(&self, attrs: &Attributes) -> String {
        generate_key(&self.prefix, attrs)
    }

    pub fn generate_context_key(&self, name: &str, value: &str) -> String {
        generate_context_key(&self.prefix, name, value)
    }

    // ========================================================================
    // entries
    // ========================================================================

    /// Stored value for `attrs`, unless absent or expired.
    ///
    /// Expired and unreadable entries are deleted by the read.
    pub fn get(&mut self, attrs: &Attributes) -> Option<String> {
        let key = self.generate_key(attrs);

        let raw = match self.storage.get_item(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!("cache"; "read {} failed: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) if !entry.is_expired((self.clock)()) => Some(entry.data),
            Ok(_) => {
                self.discard(&key, "expired");
                None
            }
            Err(_) => {
                self.discard(&key, "corrupt");
                None
            }
        }
    }

    /// Store `value` under `key`.
    ///
    /// `ttl` defaults to the cache's default ttl; `Some(0)` stores an entry
    /// that is already expired. Each field of `contexts` indexes the entry
    /// for [`remove_by_context`](Self::remove_by_context). `CacheAdded` is
    /// emitted only after everything was written.
    pub fn set(
        &mut self,
        key: &Attributes,
        value: &str,
        ttl: Option<u64>,
        contexts: Option<&Attributes>,
    ) -> Result<(), CacheError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let generated = self.generate_key(key);

        let entry = CacheEntry::new(value, ttl, (self.clock)());
        self.storage
            .set_item(&generated, &serde_json::to_string(&entry)?)?;

        for (name, context_value) in contexts.into_iter().flat_map(Attributes::iter) {
            let context_key = self.generate_context_key(name, context_value);
            let mut keys = self.read_index(&context_key)?.unwrap_or_default();
            if !keys.contains(&generated) {
                keys.push(generated.clone());
            }
            self.storage
                .set_item(&context_key, &serde_json::to_string(&keys)?)?;
        }

        self.subscribers.dispatch(&CacheEvent::Added {
            key,
            value,
            ttl,
            contexts,
        });
        Ok(())
    }

    /// Delete the entry for `attrs`. Returns whether one existed.
    pub fn remove_by_key(&mut self, attrs: &Attributes) -> Result<bool, CacheError> {
        let key = self.generate_key(attrs);
        self.remove_generated(&key)
    }

    /// Delete every entry indexed under each field of `contexts`, then the
    /// indices themselves. Returns the number of entries deleted.
    ///
    /// A context without an index is skipped; the remaining ones are still
    /// processed.
    pub fn remove_by_context(&mut self, contexts: &Attributes) -> Result<usize, CacheError> {
        let mut removed = 0;

        for (name, value) in contexts.iter() {
            let context_key = self.generate_context_key(name, value);
            let Some(keys) = self.read_index(&context_key)? else {
                debug!("cache"; "no index for {}={}", name, value);
                continue;
            };

            for key in &keys {
                if self.remove_generated(key)? {
                    removed += 1;
                }
            }
            self.storage.remove_item(&context_key)?;
        }

        Ok(removed)
    }

    /// Drop everything in the backend.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.storage.clear()
    }

    // ========================================================================
    // events
    // ========================================================================

    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CacheEvent<'_>) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(kind, Box::new(handler))
    }

    /// Returns false if `id` is not subscribed to `kind`.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(kind, id)
    }

    // ========================================================================
    // internals
    // ========================================================================

    /// Remove a stored entry by its generated key, emitting `CacheRemoved`.
    fn remove_generated(&mut self, key: &str) -> Result<bool, CacheError> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(false);
        };
        self.storage.remove_item(key)?;

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => self.subscribers.dispatch(&CacheEvent::Removed {
                generated_key: key,
                value: &entry.data,
                ttl: entry.ttl,
            }),
            Err(e) => debug!("cache"; "removed corrupt entry {}: {}", key, e),
        }
        Ok(true)
    }

    /// Entry keys listed in a context index. Unreadable indices count as
    /// missing.
    fn read_index(&self, context_key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let Some(raw) = self.storage.get_item(context_key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(keys) => Ok(Some(keys)),
            Err(e) => {
                debug!("cache"; "ignoring corrupt index {}: {}", context_key, e);
                Ok(None)
            }
        }
    }

    /// Silent removal on read; failures only show up in verbose output.
    fn discard(&mut self, key: &str, reason: &str) {
        match self.storage.remove_item(key) {
            Ok(_) => debug!("cache"; "evicted {} entry {}", reason, key),
            Err(e) => debug!("cache"; "failed to evict {}: {}", key, e),
        }
    }
}

// ============================================================================
// tests
// ============================================================================
