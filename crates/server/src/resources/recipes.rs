//! Recipes index resource.

use dulce_core::{Error, ResourceKind, model::Recipe, projection};
use dulce_store::CollectionQuery;

use super::provider::{ConditionalRead, INDEX_LIMIT, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

pub async fn recipes_index(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::RecipesIndex, cond, || async {
        let docs = state
            .store
            .query(CollectionQuery::new("recipes").limit(INDEX_LIMIT))
            .await
            .map_err(store_error)?;

        let recipes: Vec<Recipe> = docs.into_iter().map(|doc| Recipe::from_fields(doc.id, doc.fields)).collect();
        to_payload(&projection::recipe_index(&recipes))
    })
    .await
}
