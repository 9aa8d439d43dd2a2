use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use super::CacheStore;
use crate::error::CacheError;

/// Process-local cache. Entries live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn store(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        self.entries.lock().insert(key.to_string(), value.clone());
        Ok(())
    }
}
