//! mealtrack MCP Server Implementation
//!
//! Implements the MCP server with all mealtrack tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::cache::KeyValueCache;
use crate::lookup::IngredientLookup;
use crate::meal::{MealPlanner, MealStore};
use crate::models::IngredientRef;
use crate::tools::status::StatusTracker;
use crate::tools::{foods, meals};

pub type SharedLookup = Arc<dyn IngredientLookup>;
pub type SharedCache = Arc<dyn KeyValueCache>;

/// mealtrack MCP Service
#[derive(Clone)]
pub struct MealtrackService {
    status_tracker: Arc<StatusTracker>,
    planner: Arc<MealPlanner<SharedLookup>>,
    store: Arc<MealStore<SharedCache>>,
    tool_router: ToolRouter<MealtrackService>,
}

impl MealtrackService {
    pub fn new(status_tracker: StatusTracker, lookup: SharedLookup, cache: SharedCache) -> Self {
        Self {
            status_tracker: Arc::new(status_tracker),
            planner: Arc::new(MealPlanner::new(lookup)),
            store: Arc::new(MealStore::new(cache)),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupIngredientParams {
    /// Exact food name, e.g. "broccoli"
    pub food_name: String,
    /// Quantity of `selected_unit`; defaults to the reference serving quantity
    pub selected_qty: Option<f64>,
    /// One of the food's serving measures; defaults to the reference serving unit
    pub selected_unit: Option<String>,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMealParams {
    pub ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealTitleParams {
    pub title: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveMealParams {
    pub title: String,
    pub ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenameMealParams {
    pub old_title: String,
    pub new_title: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealtrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the mealtrack service including build info, database status, and nutrition API configuration")]
    async fn mealtrack_status(&self) -> Result<CallToolResult, McpError> {
        to_json(&self.status_tracker.get_status())
    }

    // --- Foods ---

    #[tool(description = "Search common foods by name. Returns food names usable with lookup_ingredient and calculate_meal.")]
    async fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::search_foods(self.planner.lookup(), &p.query, p.limit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get nutrients for one food, scaled to an optional quantity and serving unit. Lists the serving units the food supports.")]
    async fn lookup_ingredient(&self, Parameters(p): Parameters<LookupIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = foods::lookup_ingredient(
            self.planner.lookup(),
            &p.food_name,
            p.selected_qty,
            p.selected_unit.as_deref(),
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({ "error": "Food not found", "food_name": p.food_name })),
        }
    }

    // --- Meals ---

    #[tool(description = "Total the nutrients of a meal. Each ingredient is a food name with a quantity and serving unit; ingredients with an unknown unit are listed but not counted.")]
    async fn calculate_meal(&self, Parameters(p): Parameters<CalculateMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::calculate_meal(&self.planner, &p.ingredients)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List saved meals ordered by title")]
    async fn list_meals(&self) -> Result<CallToolResult, McpError> {
        let result = meals::list_meals(&self.store).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a saved meal with its nutrient totals recalculated")]
    async fn get_meal(&self, Parameters(p): Parameters<MealTitleParams>) -> Result<CallToolResult, McpError> {
        let result = meals::get_meal(&self.store, &self.planner, &p.title)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({ "error": "Meal not found", "title": p.title })),
        }
    }

    #[tool(description = "Save a meal under a title. An existing meal with the same title is replaced.")]
    async fn save_meal(&self, Parameters(p): Parameters<SaveMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::save_meal(&self.store, &p.title, p.ingredients)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Rename a saved meal, keeping its ingredients")]
    async fn rename_meal(&self, Parameters(p): Parameters<RenameMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::rename_meal(&self.store, &p.old_title, &p.new_title)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a saved meal")]
    async fn delete_meal(&self, Parameters(p): Parameters<MealTitleParams>) -> Result<CallToolResult, McpError> {
        let result = meals::delete_meal(&self.store, &p.title).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for MealtrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealtrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meal Nutrition Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "mealtrack - Meal nutrition totals from Nutritionix foods. \
                 Foods: search_foods to find names, lookup_ingredient for serving units and scaled nutrients. \
                 Meals: calculate_meal with [{food_name, selected_unit, selected_qty}], \
                 save_meal/get_meal/list_meals/rename_meal/delete_meal for saved meals. \
                 selected_unit must be one of the food's measures or the ingredient is not counted."
                    .into(),
            ),
        }
    }
}
