//! `[cache]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [cache]
//! backend = "durable"       # "durable" (files under `dir`) | "memory"
//! dir = ".deduce/cache"     # relative to the project root
//! prefix = "_cache"         # storage key prefix
//! default_ttl = 604800      # seconds, used when a write gives no ttl
//! snippet_ttl = 3600        # seconds, used for rendered code blocks
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cache::{Backend, DEFAULT_PREFIX, DEFAULT_TTL};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: Backend,
    pub dir: PathBuf,
    pub prefix: String,
    pub default_ttl: u64,
    pub snippet_ttl: u64,
}

impl CacheConfig {
    pub const PREFIX: FieldPath = FieldPath::new("cache.prefix");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.prefix.is_empty() {
            diag.error(Self::PREFIX, "must not be empty");
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Durable,
            dir: ".deduce/cache".into(),
            prefix: DEFAULT_PREFIX.into(),
            default_ttl: DEFAULT_TTL,
            snippet_ttl: 3600,
        }
    }
}
