//! Data models
//!
//! Ingredient, nutrient and meal types shared by every layer.

mod ingredient;
mod meal;
mod nutrients;

pub use ingredient::{
    FoodTag, IngredientRecord, IngredientSummary, Photo, ServingMeasure, SummaryPhoto,
};
pub use meal::{IngredientRef, Meal, MealQuery};
pub use nutrients::{MealTotals, Nutrient, Nutrients};

#[cfg(test)]
pub(crate) use ingredient::fixtures;
