//! Stored entry format.

use serde::{Deserialize, Serialize};

/// Default time to live: one week.
pub const DEFAULT_TTL: u64 = 604_800;

/// A cached value with its expiry metadata, stored as JSON.
///
/// ```json
/// {"data": "...", "ttl": 3600, "createdAt": 1718000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: String,
    /// Seconds the entry stays valid.
    pub ttl: u64,
    /// Unix timestamp (seconds) of the write.
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}

impl CacheEntry {
    pub fn new(data: impl Into<String>, ttl: u64, created_at: u64) -> Self {
        Self {
            data: data.into(),
            ttl,
            created_at,
        }
    }

    /// An entry is expired once its full ttl has elapsed.
    ///
    /// A clock that went backwards counts as no time elapsed.
    pub fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.created_at) >= self.ttl
    }
}

/// Current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
