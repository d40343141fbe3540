//! mealtrack Library
//!
//! Meal nutrition totals over the Nutritionix food database.

pub mod build_info;
pub mod cache;
pub mod config;
pub mod db;
pub mod lookup;
pub mod mcp;
pub mod meal;
pub mod models;
pub mod nutrition;
pub mod tools;
