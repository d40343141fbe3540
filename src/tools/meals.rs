//! Meal MCP Tools
//!
//! Calculate meal totals from ingredient selections and manage saved meals.

use std::collections::HashSet;

use serde::Serialize;

use crate::cache::KeyValueCache;
use crate::lookup::IngredientLookup;
use crate::meal::{IngredientList, MealPlanner, MealStore};
use crate::models::{IngredientRef, Meal, MealQuery, MealTotals};
use crate::nutrition::{format_amount, nutrition_facts, scaled_nutrients, serving_ratio, NutritionFact};

/// One ingredient line in a calculated meal
#[derive(Debug, Serialize)]
pub struct MealIngredientLine {
    pub food_name: String,
    pub selected_qty: f64,
    pub selected_unit: String,
    /// False when the selected unit is unknown; the ingredient is left out of the totals
    pub counted: bool,
    pub calories: String,
}

/// Response for calculate_meal and the body of get_meal
#[derive(Debug, Serialize)]
pub struct MealCalculation {
    pub ingredients: Vec<MealIngredientLine>,
    /// Requested names that did not resolve to any food
    pub unresolved: Vec<String>,
    pub totals: MealTotals,
    pub facts: Vec<NutritionFact>,
}

impl MealCalculation {
    fn new(list: &IngredientList, requested: &[IngredientRef]) -> Self {
        let ingredients = list
            .iter()
            .map(|ing| MealIngredientLine {
                food_name: ing.food_name.clone(),
                selected_qty: ing.selected_qty,
                selected_unit: ing.selected_unit.clone(),
                counted: serving_ratio(ing).is_some(),
                calories: format_amount(scaled_nutrients(ing).nf_calories),
            })
            .collect();

        let mut seen = HashSet::new();
        let unresolved: Vec<String> = requested
            .iter()
            .filter(|r| !list.contains(&r.food_name) && seen.insert(r.food_name.clone()))
            .map(|r| r.food_name.clone())
            .collect();

        let totals = list.totals();
        Self {
            ingredients,
            unresolved,
            facts: nutrition_facts(&totals),
            totals,
        }
    }
}

/// Response for get_meal
#[derive(Debug, Serialize)]
pub struct MealDetail {
    pub title: String,
    pub path: String,
    pub calculation: MealCalculation,
}

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub meals: Vec<Meal>,
    pub count: usize,
}

/// Response for save_meal and rename_meal
#[derive(Debug, Serialize)]
pub struct SaveMealResponse {
    pub success: bool,
    pub title: String,
    pub path: String,
}

/// Response for delete_meal
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub success: bool,
    pub deleted_title: String,
}

/// Resolve selections and total the meal's nutrients
pub async fn calculate_meal<L: IngredientLookup>(
    planner: &MealPlanner<L>,
    refs: &[IngredientRef],
) -> Result<MealCalculation, String> {
    let list = planner
        .init_from_refs(refs)
        .await
        .map_err(|e| format!("Failed to resolve ingredients: {}", e))?;
    Ok(MealCalculation::new(&list, refs))
}

/// List saved meals ordered by title
pub fn list_meals<C: KeyValueCache>(store: &MealStore<C>) -> Result<ListMealsResponse, String> {
    let meals = store
        .list()
        .map_err(|e| format!("Failed to list meals: {}", e))?;
    let count = meals.len();
    Ok(ListMealsResponse { meals, count })
}

/// Load a saved meal and recompute its totals
pub async fn get_meal<L: IngredientLookup, C: KeyValueCache>(
    store: &MealStore<C>,
    planner: &MealPlanner<L>,
    title: &str,
) -> Result<Option<MealDetail>, String> {
    let Some(meal) = store
        .get(title.trim())
        .map_err(|e| format!("Failed to get meal: {}", e))?
    else {
        return Ok(None);
    };

    let (query, list) = planner
        .load_meal(&meal)
        .await
        .map_err(|e| format!("Failed to resolve ingredients: {}", e))?;

    Ok(Some(MealDetail {
        title: meal.title,
        path: meal.path,
        calculation: MealCalculation::new(&list, &query.ingredients),
    }))
}

/// Save (or overwrite) a meal under `title`.
///
/// Titles are trimmed here and in every lookup by title.
pub fn save_meal<C: KeyValueCache>(
    store: &MealStore<C>,
    title: &str,
    ingredients: Vec<IngredientRef>,
) -> Result<SaveMealResponse, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Meal title cannot be empty".to_string());
    }

    let query = MealQuery {
        title: title.to_string(),
        ingredients,
    };
    let meal = Meal::new(title, query.to_path());
    store
        .update(&meal)
        .map_err(|e| format!("Failed to save meal: {}", e))?;

    Ok(SaveMealResponse {
        success: true,
        title: meal.title,
        path: meal.path,
    })
}

/// Give a saved meal a new title, keeping its ingredients
pub fn rename_meal<C: KeyValueCache>(
    store: &MealStore<C>,
    old_title: &str,
    new_title: &str,
) -> Result<SaveMealResponse, String> {
    let old_title = old_title.trim();
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return Err("New meal title cannot be empty".to_string());
    }

    let existing = store
        .get(old_title)
        .map_err(|e| format!("Failed to get meal: {}", e))?
        .ok_or_else(|| format!("Meal not found: {}", old_title))?;

    let mut query = existing.query();
    query.title = new_title.to_string();
    let meal = Meal::new(new_title, query.to_path());

    store
        .rename(old_title, &meal)
        .map_err(|e| format!("Failed to rename meal: {}", e))?;

    Ok(SaveMealResponse {
        success: true,
        title: meal.title,
        path: meal.path,
    })
}

/// Delete a saved meal
pub fn delete_meal<C: KeyValueCache>(
    store: &MealStore<C>,
    title: &str,
) -> Result<DeleteMealResponse, String> {
    let title = title.trim();
    let exists = store
        .get(title)
        .map_err(|e| format!("Database error: {}", e))?
        .is_some();
    if !exists {
        return Err(format!("Meal not found: {}", title));
    }

    store
        .remove(title)
        .map_err(|e| format!("Failed to delete meal: {}", e))?;

    Ok(DeleteMealResponse {
        success: true,
        deleted_title: title.to_string(),
    })
}
