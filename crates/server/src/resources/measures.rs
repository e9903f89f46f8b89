//! Measures index resource.

use dulce_core::{Error, ResourceKind, model::Measure, projection};
use dulce_store::CollectionQuery;

use super::provider::{ConditionalRead, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

pub async fn measures_index(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::MeasuresIndex, cond, || async {
        let docs = state.store.query(CollectionQuery::new("measures")).await.map_err(store_error)?;

        let measures: Vec<Measure> = docs.into_iter().map(|doc| Measure::from_fields(doc.id, doc.fields)).collect();
        to_payload(&projection::measure_index(&measures))
    })
    .await
}
