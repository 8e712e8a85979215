//! # The KvStore Trait
//!
//! The storage seam the cart engine is written against.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KvStore Contract                                  │
//! │                                                                         │
//! │  get(key)        ──► Some(bytes) if the key was ever written,          │
//! │                      None otherwise                                     │
//! │                                                                         │
//! │  put(key, bytes) ──► replaces any previous value for the key;          │
//! │                      the returned future resolves once the write       │
//! │                      is durable (or has failed)                         │
//! │                                                                         │
//! │  A successful put followed by a get (with no interleaving put) must    │
//! │  return exactly the written bytes. Nothing else is promised: ordering  │
//! │  across concurrent callers is the ENGINE's job, which is why the       │
//! │  engine keeps one in-flight write at a time.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations are injected into the engine as `Arc<dyn KvStore>`, so
//! the trait must be object safe - hence `async_trait`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{KvError, KvResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable key-value storage: the persistence contract the cart engine
/// consumes.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> KvResult<()>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// A process-local [`KvStore`] backed by a `HashMap`.
///
/// ## When To Use
/// - Tests that don't need durability
/// - Callers embedding the engine somewhere a database isn't wanted
///
/// Values do not survive the process; for durable storage use
/// [`SqliteKvStore`](crate::SqliteKvStore).
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with entries.
    ///
    /// ## Usage
    /// Handy in tests that simulate a restart: seed with the blob a previous
    /// process would have written, then open the engine over it.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        MemoryKvStore {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| KvError::Internal("kv map lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| KvError::Internal("kv map lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let kv = MemoryKvStore::new();
        assert_eq!(kv.get("products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let kv = MemoryKvStore::new();
        kv.put("products", b"[1,2,3]").await.unwrap();
        assert_eq!(kv.get("products").await.unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
    }

    #[tokio::test]
    async fn test_put_replaces_previous_value() {
        let kv = MemoryKvStore::new();
        kv.put("products", b"old").await.unwrap();
        kv.put("products", b"new").await.unwrap();
        assert_eq!(kv.get("products").await.unwrap().as_deref(), Some(&b"new"[..]));
    }

    #[tokio::test]
    async fn test_with_entries_seeds_values() {
        let kv = MemoryKvStore::with_entries([("products".to_string(), b"[]".to_vec())]);
        assert_eq!(kv.get("products").await.unwrap().as_deref(), Some(&b"[]"[..]));
    }
}
