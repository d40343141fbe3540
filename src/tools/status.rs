//! mealtrack Status Tool
//!
//! Provides runtime status information about the mealtrack service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::build_info::BuildInfo;

/// Runtime status of the mealtrack service
#[derive(Debug, Clone, Serialize)]
pub struct MealtrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Nutrition API information
    pub nutritionix_base_url: String,
    pub nutritionix_configured: bool,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    database_path: PathBuf,
    nutritionix_base_url: String,
    nutritionix_configured: bool,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, nutritionix_base_url: String, nutritionix_configured: bool) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            database_path,
            nutritionix_base_url,
            nutritionix_configured,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MealtrackStatus {
        let build_info = BuildInfo::current();

        // Size is absent until the first write creates the file
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        MealtrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            nutritionix_base_url: self.nutritionix_base_url.clone(),
            nutritionix_configured: self.nutritionix_configured,
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: std::process::id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_database_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.db");

        let tracker = StatusTracker::new(path.clone(), "http://localhost".to_string(), false);
        assert_eq!(tracker.get_status().database_size_bytes, None);

        std::fs::write(&path, b"abcd").unwrap();
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, Some(4));
        assert!(!status.nutritionix_configured);
        assert_eq!(status.process_id, std::process::id());
    }
}
