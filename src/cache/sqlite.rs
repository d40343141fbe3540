//! SQLite cache backend
//!
//! Values are stored as JSON text in `cache_entries`; `cache_namespaces` records which
//! namespaces have ever been written so `get_all` can tell "empty" from "absent".

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::{CacheResult, KeyValueCache};
use crate::db::Database;

#[derive(Clone)]
pub struct SqliteCache {
    database: Database,
}

impl SqliteCache {
    /// Wrap a database whose migrations have already run
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl KeyValueCache for SqliteCache {
    fn get(&self, namespace: &str, key: &str) -> CacheResult<Option<Value>> {
        let conn = self.database.get_conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM cache_entries WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> CacheResult<()> {
        let text = serde_json::to_string(&value)?;
        self.database.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO cache_namespaces (namespace) VALUES (?1)",
                [namespace],
            )?;
            tx.execute(
                r#"
                INSERT INTO cache_entries (namespace, key, value) VALUES (?1, ?2, ?3)
                ON CONFLICT(namespace, key)
                DO UPDATE SET value = excluded.value, updated_at = datetime('now')
                "#,
                params![namespace, key, text],
            )?;
            tx.commit()?;
            Ok(())
        })?;
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> CacheResult<()> {
        let conn = self.database.get_conn()?;
        conn.execute(
            "DELETE FROM cache_entries WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
        )?;
        Ok(())
    }

    fn get_all(&self, namespace: &str) -> CacheResult<Option<BTreeMap<String, Value>>> {
        let conn = self.database.get_conn()?;

        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM cache_namespaces WHERE namespace = ?1",
                [namespace],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT key, value FROM cache_entries WHERE namespace = ?1 ORDER BY key ASC",
        )?;
        let rows = stmt
            .query_map([namespace], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = BTreeMap::new();
        for (key, text) in rows {
            entries.insert(key, serde_json::from_str(&text)?);
        }
        Ok(Some(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, SqliteCache) {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::open(dir.path().join("cache.db")).unwrap();
        (dir, SqliteCache::new(database))
    }

    #[test]
    fn test_sqlite_backend() {
        let (_dir, cache) = open_temp();
        super::super::exercise_backend(&cache);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        {
            let cache = SqliteCache::new(Database::open(&path).unwrap());
            cache.set("mealStore", "Lunch", serde_json::json!({"title": "Lunch", "path": ""})).unwrap();
        }
        let cache = SqliteCache::new(Database::open(&path).unwrap());
        let value = cache.get("mealStore", "Lunch").unwrap().unwrap();
        assert_eq!(value["title"], "Lunch");
    }
}
