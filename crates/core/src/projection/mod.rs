//! Read-view projections and aggregations.
//!
//! Pure, side-effect-free transforms over raw entity lists. Every
//! projection ends with a deterministic sort so that semantically
//! unchanged underlying data always serializes identically — an unstable
//! order would generate spurious ETag churn and defeat conditional reads.

pub mod client;
pub mod index;
pub mod movement;

pub use client::{ClientActivity, aggregate_client_purchases};
pub use index::{
    CategoryIndex, MeasureIndex, PersonIndex, ProductIndex, RecipeIndex, category_index, measure_index, person_index,
    product_index, recipe_index,
};
pub use movement::{MovementRollup, aggregate_movements, filter_last_30_days};
