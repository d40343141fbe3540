//! Runtime configuration
//!
//! Everything is read from the environment once at startup.

use std::path::PathBuf;

pub const DATABASE_PATH_VAR: &str = "MEALTRACK_DATABASE_PATH";
pub const APP_ID_VAR: &str = "NUTRITIONIX_APP_ID";
pub const APP_KEY_VAR: &str = "NUTRITIONIX_APP_KEY";
pub const BASE_URL_VAR: &str = "NUTRITIONIX_BASE_URL";
pub const REMOTE_USER_VAR: &str = "NUTRITIONIX_REMOTE_USER_ID";

pub const DEFAULT_BASE_URL: &str = "https://trackapi.nutritionix.com";

/// Credentials and endpoint for the Nutritionix API
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionixConfig {
    pub base_url: String,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub remote_user_id: String,
}

impl Default for NutritionixConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: None,
            app_key: None,
            remote_user_id: "0".to_string(),
        }
    }
}

impl NutritionixConfig {
    pub fn with_credentials(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            app_key: Some(app_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: var(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            app_id: var(APP_ID_VAR),
            app_key: var(APP_KEY_VAR),
            remote_user_id: var(REMOTE_USER_VAR).unwrap_or(defaults.remote_user_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub nutritionix: NutritionixConfig,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
    }

    fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_path: var(DATABASE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            nutritionix: NutritionixConfig::from_lookup(&var),
        }
    }
}

/// `data/mealtrack.db` under the project root, found relative to the executable
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("mealtrack.db");
    path
}
