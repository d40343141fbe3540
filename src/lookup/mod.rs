//! Ingredient lookup
//!
//! Resolves food names to full nutrient detail through an external database.

mod cached;
mod nutritionix;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::CacheError;
use crate::models::{IngredientRecord, IngredientSummary};

pub use cached::CachedLookup;
pub use nutritionix::NutritionixClient;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Nutritionix credentials are not configured (set NUTRITIONIX_APP_ID and NUTRITIONIX_APP_KEY)")]
    MissingCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Nutritionix returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Source of ingredient details
#[async_trait]
pub trait IngredientLookup: Send + Sync {
    /// Full detail for the food named exactly `food_name`, or `None` if there is no match.
    /// The returned record has its selection set to the default serving.
    async fn fetch_ingredient(&self, food_name: &str)
        -> Result<Option<IngredientRecord>, LookupError>;

    /// Free-text search over common foods
    async fn search(&self, query: &str) -> Result<Vec<IngredientSummary>, LookupError>;
}

#[async_trait]
impl<L: IngredientLookup + ?Sized> IngredientLookup for Arc<L> {
    async fn fetch_ingredient(
        &self,
        food_name: &str,
    ) -> Result<Option<IngredientRecord>, LookupError> {
        (**self).fetch_ingredient(food_name).await
    }

    async fn search(&self, query: &str) -> Result<Vec<IngredientSummary>, LookupError> {
        (**self).search(query).await
    }
}
