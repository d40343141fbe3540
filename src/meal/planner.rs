//! Filling ingredient lists from the lookup service

use futures_util::future::join_all;

use super::IngredientList;
use crate::lookup::{IngredientLookup, LookupError};
use crate::models::{IngredientRecord, IngredientRef, Meal, MealQuery};

/// Resolves names and saved selections into ingredient lists.
///
/// Lookups for one call run concurrently; results keep the order of the request.
/// Names with no match are dropped. Any lookup error fails the whole call.
pub struct MealPlanner<L> {
    lookup: L,
}

impl<L: IngredientLookup> MealPlanner<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    async fn fetch_all<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Option<IngredientRecord>>, LookupError> {
        let fetches = names
            .iter()
            .map(|name| self.lookup.fetch_ingredient(name.as_ref()));
        join_all(fetches).await.into_iter().collect()
    }

    /// Look up each name at its default serving and merge into `list`.
    /// Returns how many names resolved.
    pub async fn add_ingredients<S: AsRef<str>>(
        &self,
        list: &mut IngredientList,
        names: &[S],
    ) -> Result<usize, LookupError> {
        let found: Vec<IngredientRecord> = self.fetch_all(names).await?.into_iter().flatten().collect();
        let resolved = found.len();
        if resolved < names.len() {
            tracing::warn!("{} of {} ingredients had no match", names.len() - resolved, names.len());
        }
        list.add_many(found);
        Ok(resolved)
    }

    /// Build a list from saved references, applying each reference's selection
    pub async fn init_from_refs(&self, refs: &[IngredientRef]) -> Result<IngredientList, LookupError> {
        let names: Vec<&str> = refs.iter().map(|r| r.food_name.as_str()).collect();
        let fetched = self.fetch_all(&names).await?;

        let records = refs.iter().zip(fetched).filter_map(|(r, found)| {
            if found.is_none() {
                tracing::warn!("Saved ingredient '{}' no longer resolves", r.food_name);
            }
            found.map(|ing| ing.with_selection(r.selected_qty, r.selected_unit.clone()))
        });
        Ok(IngredientList::from_records(records))
    }

    /// Title and resolved ingredients of a saved meal
    pub async fn load_meal(&self, meal: &Meal) -> Result<(MealQuery, IngredientList), LookupError> {
        let query = meal.query();
        let list = self.init_from_refs(&query.ingredients).await?;
        Ok((query, list))
    }
}
