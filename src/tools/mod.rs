//! mealtrack Tools module
//!
//! Tool implementations behind the MCP server.

pub mod foods;
pub mod meals;
pub mod status;
