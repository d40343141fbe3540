//! Meal state
//!
//! The in-memory ingredient list behind a meal, the planner that fills it from the
//! lookup service, and the store of saved meals.

mod ingredients;
mod planner;
mod store;

pub use ingredients::IngredientList;
pub use planner::MealPlanner;
pub use store::MealStore;
