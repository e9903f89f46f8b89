//! Categories index resource.

use dulce_core::{Error, ResourceKind, model::Category, projection};
use dulce_store::CollectionQuery;

use super::provider::{ConditionalRead, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

pub async fn categories_index(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::CategoriesIndex, cond, || async {
        let docs = state.store.query(CollectionQuery::new("categories")).await.map_err(store_error)?;

        let categories: Vec<Category> =
            docs.into_iter().map(|doc| Category::from_fields(doc.id, doc.fields)).collect();
        to_payload(&projection::category_index(&categories))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_core::AppConfig;
    use dulce_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_index_sorted_by_name() {
        let store = Arc::new(MemoryStore::new());
        store.insert("categories", "c2", json!({"name": "tartas"})).await;
        store.insert("categories", "c1", json!({"name": "alfajores"})).await;
        let state = AppState::new(AppConfig::default(), store);

        let read = categories_index(&state, &ConditionalRead::default()).await.unwrap();
        let rows = read.payload.unwrap();
        assert_eq!(rows[0]["name"], "alfajores");
        assert_eq!(rows[1]["name"], "tartas");
    }
}
