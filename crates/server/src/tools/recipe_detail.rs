//! get_recipe_detail tool implementation.
//!
//! Resolves a recipe's ingredient lines against the referenced products
//! and their measures. Sub-fetches run concurrently and join before the
//! response is assembled. A dangling product reference renders as a
//! placeholder line, not an error.

use std::collections::HashMap;

use dulce_core::{
    Error,
    model::{Measure, Product, Recipe},
};
use futures_util::future::try_join_all;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;
use crate::resources::provider::store_error;

/// Parameters for the get_recipe_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecipeDetailParams {
    /// Recipe document id.
    pub recipe_id: String,
}

/// One resolved ingredient line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub product_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// One recipe section with its resolved ingredients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionDetail {
    pub name: String,
    pub ingredients: Vec<IngredientLine>,
}

/// Output from the get_recipe_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailOutput {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub sale_price: f64,
    pub on_sale: bool,
    pub profit_percentage: f64,
    pub description: String,
    pub sections: Vec<SectionDetail>,
}

/// Implementation of the get_recipe_detail tool.
pub async fn detail_impl(state: &AppState, params: RecipeDetailParams) -> Result<CallToolResult, McpError> {
    if params.recipe_id.trim().is_empty() {
        return Err(Error::Validation("recipe_id cannot be empty".to_string()).into());
    }

    let doc = state
        .store
        .get("recipes", &params.recipe_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| Error::NotFound(format!("recipe {}", params.recipe_id)))?;
    let recipe = Recipe::from_fields(doc.id, doc.fields);

    let product_ids = recipe.referenced_product_ids();
    let fetched = try_join_all(product_ids.iter().map(|id| state.store.get("products", id)))
        .await
        .map_err(store_error)?;
    let products: HashMap<String, Product> = fetched
        .into_iter()
        .flatten()
        .map(|doc| {
            let product = Product::from_fields(doc.id, doc.fields);
            (product.id.clone(), product)
        })
        .collect();

    let mut measure_ids: Vec<&str> =
        products.values().filter(|p| !p.measure.is_empty()).map(|p| p.measure.as_str()).collect();
    measure_ids.sort_unstable();
    measure_ids.dedup();

    let fetched = try_join_all(measure_ids.iter().map(|id| state.store.get("measures", id)))
        .await
        .map_err(store_error)?;
    let measures: HashMap<String, Measure> = fetched
        .into_iter()
        .flatten()
        .map(|doc| {
            let measure = Measure::from_fields(doc.id, doc.fields);
            (measure.id.clone(), measure)
        })
        .collect();

    let sections = recipe
        .sections
        .iter()
        .map(|section| SectionDetail {
            name: section.name.clone(),
            ingredients: section
                .products
                .iter()
                .map(|line| match products.get(&line.product_id) {
                    Some(product) => IngredientLine {
                        product_id: line.product_id.clone(),
                        name: product.name.clone(),
                        quantity: line.quantity,
                        unit: measures
                            .get(&product.measure)
                            .map(|m| m.unit.clone())
                            .unwrap_or_else(|| "units".to_string()),
                    },
                    None => IngredientLine {
                        product_id: line.product_id.clone(),
                        name: format!("unknown product ({})", line.product_id),
                        quantity: line.quantity,
                        unit: "units".to_string(),
                    },
                })
                .collect(),
        })
        .collect();

    let output = RecipeDetailOutput {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        cost: recipe.cost,
        sale_price: recipe.sale_price,
        on_sale: recipe.on_sale,
        profit_percentage: recipe.profit_percentage,
        description: recipe.description.clone(),
        sections,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Internal(format!("failed to serialize recipe detail: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_core::AppConfig;
    use dulce_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    async fn seeded_state() -> AppState {
        let store = Arc::new(MemoryStore::new());
        store.insert("measures", "m1", json!({"name": "kilogramo", "unit": "kg"})).await;
        store.insert("products", "p1", json!({"name": "harina", "measure": "m1"})).await;
        store
            .insert(
                "recipes",
                "r1",
                json!({
                    "name": "Torta",
                    "cost": 850.0,
                    "salePrice": 2000.0,
                    "onSale": true,
                    "sections": [{
                        "id": "s1",
                        "name": "Base",
                        "products": [
                            {"productId": "p1", "quantity": 0.5},
                            {"productId": "gone", "quantity": 2.0}
                        ]
                    }]
                }),
            )
            .await;
        AppState::new(AppConfig::default(), store)
    }

    fn read_output(result: &CallToolResult) -> RecipeDetailOutput {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        serde_json::from_str(content["text"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_detail_resolves_products_and_units() {
        let state = seeded_state().await;
        let result = detail_impl(&state, RecipeDetailParams { recipe_id: "r1".into() }).await.unwrap();
        let output = read_output(&result);

        assert_eq!(output.name, "Torta");
        let ingredients = &output.sections[0].ingredients;
        assert_eq!(ingredients[0].name, "harina");
        assert_eq!(ingredients[0].unit, "kg");
    }

    #[tokio::test]
    async fn test_dangling_reference_renders_placeholder() {
        let state = seeded_state().await;
        let result = detail_impl(&state, RecipeDetailParams { recipe_id: "r1".into() }).await.unwrap();
        let output = read_output(&result);

        let dangling = &output.sections[0].ingredients[1];
        assert!(dangling.name.contains("unknown product"));
        assert_eq!(dangling.unit, "units");
        assert_eq!(dangling.quantity, 2.0);
    }

    #[tokio::test]
    async fn test_unknown_recipe() {
        let state = seeded_state().await;
        let result = detail_impl(&state, RecipeDetailParams { recipe_id: "r9".into() }).await;
        assert!(result.is_err());
    }
}
