//! TTL cache for external search results.
//!
//! The combined search orchestrator caches the (filtered) document list
//! from the metadata catalog so repeated identical queries within the TTL
//! window skip the remote call. The cache is a collaborator behind
//! [`ResultCache`]; a failing backend is treated as a permanent miss by
//! callers, never as a fatal error.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::metadata::MetadataDoc;

/// Cache backend failure. Callers treat this as a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store with per-entry time-to-live.
pub trait ResultCache: Send + Sync {
    /// Look up a cached document list. Expired entries read as `None`.
    fn get(&self, key: &str) -> Result<Option<Vec<MetadataDoc>>, CacheError>;

    /// Store a document list for `ttl` from now, replacing any previous
    /// entry under the key.
    fn set(&self, key: &str, docs: Vec<MetadataDoc>, ttl: Duration) -> Result<(), CacheError>;
}

struct CacheEntry {
    docs: Vec<MetadataDoc>,
    expires_at: Instant,
}

/// In-memory [`ResultCache`] implementation.
///
/// Expired entries are dropped lazily on read; there is no background
/// eviction.
#[derive(Default)]
pub struct MemoryResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.values().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for MemoryResultCache {
    fn get(&self, key: &str) -> Result<Option<Vec<MetadataDoc>>, CacheError> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.docs.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, docs: Vec<MetadataDoc>, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                docs,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
