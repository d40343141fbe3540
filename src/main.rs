//! mealtrack
//!
//! An MCP server for meal nutrition tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use mealtrack::build_info;
use mealtrack::cache::SqliteCache;
use mealtrack::config::Config;
use mealtrack::db::{migrations, Database};
use mealtrack::lookup::{CachedLookup, NutritionixClient};
use mealtrack::mcp::{MealtrackService, SharedCache, SharedLookup};
use mealtrack::tools::status::StatusTracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealtrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    let db_path = config.database_path.clone();
    eprintln!("Database path: {}", db_path.display());

    // Ensure data directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::open(&db_path)?;
    let version = database.with_conn(migrations::get_schema_version)?;
    eprintln!("Database schema version: {}", version);

    let credentials = config.nutritionix.app_id.is_some() && config.nutritionix.app_key.is_some();
    if !credentials {
        tracing::warn!(
            "NUTRITIONIX_APP_ID / NUTRITIONIX_APP_KEY not set; uncached food lookups will fail"
        );
    }

    let cache: SharedCache = Arc::new(SqliteCache::new(database));
    let client = NutritionixClient::new(config.nutritionix.clone())?;
    let lookup: SharedLookup = Arc::new(CachedLookup::new(client, cache.clone()));

    let tracker = StatusTracker::new(db_path, config.nutritionix.base_url.clone(), credentials);
    let service = MealtrackService::new(tracker, lookup, cache);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
