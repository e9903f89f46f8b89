//! Core types and shared functionality for mcp-dulce.
//!
//! This crate provides:
//! - In-memory resource cache with conditional-read support
//! - Raw entity models and read-view projections
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod projection;

pub use cache::{CacheEntry, CacheStats, ResourceCache, ResourceKind, TtlPolicy};
pub use config::AppConfig;
pub use error::Error;
