//! Namespaced key-value cache
//!
//! Ingredient details and saved meals are kept as JSON documents under a namespace.
//! The namespace is an argument on every call, so one backend serves all stores.

mod memory;
mod sqlite;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::db::DbError;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

/// Namespace holding resolved ingredient details, keyed by food name
pub const INGREDIENT_CACHE: &str = "ingredientCache";
/// Namespace holding saved meals, keyed by title
pub const MEAL_STORE: &str = "mealStore";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Cache value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for CacheError {
    fn from(e: rusqlite::Error) -> Self {
        CacheError::Db(DbError::Sqlite(e))
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value storage partitioned by namespace
pub trait KeyValueCache: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> CacheResult<Option<Value>>;

    /// Insert or overwrite. Creates the namespace on first write.
    fn set(&self, namespace: &str, key: &str, value: Value) -> CacheResult<()>;

    /// Remove a key. Missing keys and namespaces are ignored.
    fn delete(&self, namespace: &str, key: &str) -> CacheResult<()>;

    /// Every entry of a namespace; `None` if the namespace was never written
    fn get_all(&self, namespace: &str) -> CacheResult<Option<BTreeMap<String, Value>>>;
}

impl<C: KeyValueCache + ?Sized> KeyValueCache for Arc<C> {
    fn get(&self, namespace: &str, key: &str) -> CacheResult<Option<Value>> {
        (**self).get(namespace, key)
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> CacheResult<()> {
        (**self).set(namespace, key, value)
    }

    fn delete(&self, namespace: &str, key: &str) -> CacheResult<()> {
        (**self).delete(namespace, key)
    }

    fn get_all(&self, namespace: &str) -> CacheResult<Option<BTreeMap<String, Value>>> {
        (**self).get_all(namespace)
    }
}

/// Typed access on top of the JSON values
pub trait KeyValueCacheExt: KeyValueCache {
    fn get_as<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> CacheResult<Option<T>> {
        match self.get(namespace, key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn set_as<T: Serialize>(&self, namespace: &str, key: &str, value: &T) -> CacheResult<()> {
        self.set(namespace, key, serde_json::to_value(value)?)
    }

    fn get_all_as<T: DeserializeOwned>(
        &self,
        namespace: &str,
    ) -> CacheResult<Option<BTreeMap<String, T>>> {
        let Some(entries) = self.get_all(namespace)? else {
            return Ok(None);
        };
        let mut typed = BTreeMap::new();
        for (key, value) in entries {
            typed.insert(key, serde_json::from_value(value)?);
        }
        Ok(Some(typed))
    }
}

impl<C: KeyValueCache + ?Sized> KeyValueCacheExt for C {}

/// Behaviour every backend must share
#[cfg(test)]
pub(crate) fn exercise_backend(cache: &dyn KeyValueCache) {
    use serde_json::json;

    assert!(cache.get_all("ns").unwrap().is_none());
    assert!(cache.get("ns", "a").unwrap().is_none());

    // deleting from a namespace that does not exist leaves it absent
    cache.delete("ns", "a").unwrap();
    assert!(cache.get_all("ns").unwrap().is_none());

    cache.set("ns", "a", json!({"n": 1})).unwrap();
    cache.set("ns", "b", json!([1, 2])).unwrap();
    cache.set("other", "a", json!("x")).unwrap();
    assert_eq!(cache.get("ns", "a").unwrap(), Some(json!({"n": 1})));
    assert_eq!(cache.get("other", "a").unwrap(), Some(json!("x")));

    cache.set("ns", "a", json!({"n": 2})).unwrap();
    assert_eq!(cache.get("ns", "a").unwrap(), Some(json!({"n": 2})));

    let all = cache.get_all("ns").unwrap().unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    cache.delete("ns", "a").unwrap();
    cache.delete("ns", "b").unwrap();
    assert!(cache.get("ns", "a").unwrap().is_none());
    // emptied, but still exists
    assert_eq!(cache.get_all("ns").unwrap(), Some(BTreeMap::new()));
    assert_eq!(cache.get_all("other").unwrap().map(|m| m.len()), Some(1));
}
