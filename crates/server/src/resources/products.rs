//! Products index resource.

use dulce_core::{Error, ResourceKind, model::Product, projection};
use dulce_store::CollectionQuery;

use super::provider::{ConditionalRead, INDEX_LIMIT, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

pub async fn products_index(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::ProductsIndex, cond, || async {
        let docs = state
            .store
            .query(CollectionQuery::new("products").limit(INDEX_LIMIT))
            .await
            .map_err(store_error)?;

        let products: Vec<Product> = docs.into_iter().map(|doc| Product::from_fields(doc.id, doc.fields)).collect();
        to_payload(&projection::product_index(&products))
    })
    .await
}
