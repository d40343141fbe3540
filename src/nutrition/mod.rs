//! Nutrition calculation module
//!
//! Serving ratios, meal aggregation and presentation formatting.

pub mod aggregate;
pub mod format;

pub use aggregate::{aggregate, display_ratio, scaled_nutrients, scaled_phosphorus, serving_ratio};
pub use format::{format_amount, nutrition_fact, nutrition_facts, NutritionFact};
