//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-dulce server.

pub mod cache;
pub mod fetch_resource;
pub mod person_detail;
pub mod recipe_detail;

pub use cache::invalidate::CacheInvalidateParams;
pub use cache::stats::CacheStatsParams;
pub use fetch_resource::FetchResourceParams;
pub use person_detail::PersonDetailParams;
pub use recipe_detail::RecipeDetailParams;
