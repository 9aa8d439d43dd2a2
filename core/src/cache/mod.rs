//! Response cache contract and implementations.
//!
//! The pipeline talks to a cache only through [`CacheStore`]. A miss is
//! `Ok(None)`; an `Err` always aborts the request that hit it.

mod memory;
mod sqlite;

use std::sync::Arc;

use serde_json::Value;

use crate::error::CacheError;

pub use memory::MemoryCache;
pub use sqlite::{SqliteCache, DEFAULT_DB_NAME};

/// Synchronous key-value store for raw API responses.
pub trait CacheStore: Send + Sync {
    /// Look up `key`. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Save `value` under `key`, replacing any earlier value.
    fn store(&self, key: &str, value: &Value) -> Result<(), CacheError>;
}

impl<C: CacheStore + ?Sized> CacheStore for Arc<C> {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        (**self).get(key)
    }

    fn store(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        (**self).store(key, value)
    }
}
