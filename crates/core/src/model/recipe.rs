//! Recipe entities, with sections of ingredients and nested recipe refs.

use serde::{Deserialize, Serialize};

use super::decode_with_id;

/// A recipe: costing data plus its ingredient sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    #[serde(skip_deserializing)]
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub sale_price: f64,
    pub suggested_price: f64,
    pub profit_percentage: f64,
    pub on_sale: bool,
    pub customizable: bool,
    pub unit: f64,
    pub images: Vec<String>,
    pub description: String,
    pub detail: String,
    pub categories: Vec<String>,
    pub sections: Vec<RecipeSection>,
    /// Sub-recipes referenced by this one.
    pub recipes: Vec<RecipeRef>,
}

/// A named group of ingredients within a recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeSection {
    pub id: String,
    pub name: String,
    pub products: Vec<RecipeProduct>,
}

/// One ingredient line: a product reference and the quantity used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeProduct {
    pub product_id: String,
    pub quantity: f64,
}

/// Reference to a nested recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeRef {
    pub recipe_id: String,
    pub quantity: f64,
}

impl Recipe {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut recipe): (String, Recipe) = decode_with_id(id, fields);
        recipe.id = id;
        recipe
    }

    /// Product ids referenced across all sections, deduplicated, sorted.
    pub fn referenced_product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .sections
            .iter()
            .flat_map(|section| section.products.iter().map(|p| p.product_id.clone()))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
