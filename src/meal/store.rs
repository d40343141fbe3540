//! Saved meals
//!
//! Meals live in the `mealStore` namespace of the cache, keyed by title.

use crate::cache::{CacheResult, KeyValueCache, KeyValueCacheExt, MEAL_STORE};
use crate::models::Meal;

pub struct MealStore<C> {
    cache: C,
}

impl<C: KeyValueCache> MealStore<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    /// All saved meals ordered by title. Empty when nothing was ever saved.
    pub fn list(&self) -> CacheResult<Vec<Meal>> {
        let meals = self.cache.get_all_as::<Meal>(MEAL_STORE)?.unwrap_or_default();
        Ok(meals.into_values().collect())
    }

    pub fn get(&self, title: &str) -> CacheResult<Option<Meal>> {
        self.cache.get_as(MEAL_STORE, title)
    }

    /// Save a meal. Meals without a title are ignored; returns whether it was saved.
    pub fn add(&self, meal: &Meal) -> CacheResult<bool> {
        if meal.title.is_empty() {
            return Ok(false);
        }
        self.cache.set_as(MEAL_STORE, &meal.title, meal)?;
        tracing::info!("Saved meal '{}'", meal.title);
        Ok(true)
    }

    pub fn remove(&self, title: &str) -> CacheResult<()> {
        self.cache.delete(MEAL_STORE, title)?;
        tracing::info!("Removed meal '{}'", title);
        Ok(())
    }

    /// Replace the stored meal with the same title
    pub fn update(&self, meal: &Meal) -> CacheResult<bool> {
        self.cache.delete(MEAL_STORE, &meal.title)?;
        self.add(meal)
    }

    /// Store `meal` under its (possibly new) title, dropping the entry for `old_title`
    pub fn rename(&self, old_title: &str, meal: &Meal) -> CacheResult<bool> {
        if meal.title.is_empty() {
            return Ok(false);
        }
        if !old_title.is_empty() {
            self.remove(old_title)?;
        }
        self.add(meal)
    }
}
