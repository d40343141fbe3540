//! Cache-first ingredient lookup

use async_trait::async_trait;

use super::{IngredientLookup, LookupError};
use crate::cache::{KeyValueCache, KeyValueCacheExt, INGREDIENT_CACHE};
use crate::models::{IngredientRecord, IngredientSummary};

/// Wraps a lookup so each food is fetched from the network at most once.
///
/// Hits and fresh results both come back with the default serving selected.
/// Misses (no matching food) are not cached.
pub struct CachedLookup<L, C> {
    inner: L,
    cache: C,
}

impl<L, C> CachedLookup<L, C>
where
    L: IngredientLookup,
    C: KeyValueCache,
{
    pub fn new(inner: L, cache: C) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<L, C> IngredientLookup for CachedLookup<L, C>
where
    L: IngredientLookup,
    C: KeyValueCache,
{
    async fn fetch_ingredient(
        &self,
        food_name: &str,
    ) -> Result<Option<IngredientRecord>, LookupError> {
        if let Some(cached) = self
            .cache
            .get_as::<IngredientRecord>(INGREDIENT_CACHE, food_name)?
        {
            tracing::debug!("Ingredient cache hit for '{}'", food_name);
            return Ok(Some(cached.with_default_selection()));
        }

        tracing::debug!("Ingredient cache miss for '{}'", food_name);
        let Some(fetched) = self.inner.fetch_ingredient(food_name).await? else {
            return Ok(None);
        };

        self.cache
            .set_as(INGREDIENT_CACHE, &fetched.food_name, &fetched)?;
        Ok(Some(fetched.with_default_selection()))
    }

    async fn search(&self, query: &str) -> Result<Vec<IngredientSummary>, LookupError> {
        self.inner.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::lookup::testing::FakeLookup;
    use crate::models::fixtures::{banana, broccoli};

    #[tokio::test]
    async fn test_second_fetch_served_from_cache() {
        let fake = Arc::new(FakeLookup::with(vec![broccoli()]));
        let cache = Arc::new(MemoryCache::new());
        let lookup = CachedLookup::new(fake.clone(), cache.clone());

        let first = lookup.fetch_ingredient("Broccoli").await.unwrap().unwrap();
        let second = lookup.fetch_ingredient("Broccoli").await.unwrap().unwrap();

        assert_eq!(fake.fetch_count(), 1);
        assert_eq!(first, second);
        assert!(cache.get(INGREDIENT_CACHE, "Broccoli").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cache_hit_resets_selection() {
        let cache = MemoryCache::new();
        let stale = broccoli().with_selection(7.0, "spear");
        cache.set_as(INGREDIENT_CACHE, "Broccoli", &stale).unwrap();

        let lookup = CachedLookup::new(FakeLookup::default(), cache);
        let hit = lookup.fetch_ingredient("Broccoli").await.unwrap().unwrap();
        assert_eq!(hit.selected_qty, 1.0);
        assert_eq!(hit.selected_unit, "cup chopped");
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let fake = Arc::new(FakeLookup::with(vec![banana()]));
        let cache = Arc::new(MemoryCache::new());
        let lookup = CachedLookup::new(fake.clone(), cache.clone());

        assert!(lookup.fetch_ingredient("Durian").await.unwrap().is_none());
        assert!(lookup.fetch_ingredient("Durian").await.unwrap().is_none());
        assert_eq!(fake.fetch_count(), 2);
        assert!(cache.get_all(INGREDIENT_CACHE).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_passes_through() {
        let lookup = CachedLookup::new(FakeLookup::with(vec![banana(), broccoli()]), MemoryCache::new());
        let hits = lookup.search("ban").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].food_name, "Banana");
    }
}
