//! In-process cache backend

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde_json::Value;

use super::{CacheError, CacheResult, KeyValueCache};

/// Cache held in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    namespaces: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, namespace: &str, key: &str) -> CacheResult<Option<Value>> {
        let namespaces = self.namespaces.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(namespaces.get(namespace).and_then(|entries| entries.get(key)).cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> CacheResult<()> {
        let mut namespaces = self.namespaces.lock().map_err(|_| CacheError::Poisoned)?;
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> CacheResult<()> {
        let mut namespaces = self.namespaces.lock().map_err(|_| CacheError::Poisoned)?;
        if let Some(entries) = namespaces.get_mut(namespace) {
            entries.remove(key);
        }
        Ok(())
    }

    fn get_all(&self, namespace: &str) -> CacheResult<Option<BTreeMap<String, Value>>> {
        let namespaces = self.namespaces.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(namespaces.get(namespace).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        super::super::exercise_backend(&MemoryCache::new());
    }
}
