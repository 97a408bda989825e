//! Storage backends.
//!
//! | Backend   | Type            | Lifetime                       |
//! |-----------|-----------------|--------------------------------|
//! | `durable` | [`FileStorage`] | one file per key, survives runs|
//! | `memory`  | [`MemoryStorage`] | dropped with the process     |

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{Deserialize, Serialize};

use super::CacheError;

/// String key/value store the cache is built on.
///
/// Each call is a single complete read or write; the cache never holds
/// state between calls beyond what the backend persists.
pub trait Storage: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Returns whether the key existed.
    fn remove_item(&mut self, key: &str) -> Result<bool, CacheError>;

    /// Remove every stored key.
    fn clear(&mut self) -> Result<(), CacheError>;
}

/// Backend selection for `[cache] backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Durable,
    Memory,
}
