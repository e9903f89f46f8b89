//! Persons index resource.
//!
//! Serves the redacted person listing. The projection's output type has
//! no fields for phones or addresses, so this read view can never leak
//! contact data whatever the store documents carry.

use dulce_core::{Error, ResourceKind, model::Person, projection};
use dulce_store::CollectionQuery;

use super::provider::{ConditionalRead, INDEX_LIMIT, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

pub async fn persons_index(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::PersonsIndex, cond, || async {
        let docs = state
            .store
            .query(CollectionQuery::new("persons").limit(INDEX_LIMIT))
            .await
            .map_err(store_error)?;

        let persons: Vec<Person> = docs.into_iter().map(|doc| Person::from_fields(doc.id, doc.fields)).collect();
        to_payload(&projection::person_index(&persons))
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
    async fn test_index_redacts_contact_data() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                "persons",
                "c1",
                json!({
                    "name": "Ana",
                    "lastName": "García",
                    "type": "CLIENT",
                    "phones": [{"phoneNumberPrefix": "+54", "phoneNumberSuffix": "5551234"}],
                    "addresses": ["Av. Siempre Viva 742"]
                }),
            )
            .await;
        let state = AppState::new(AppConfig::default(), store);

        let read = persons_index(&state, &ConditionalRead::default()).await.unwrap();
        let serialized = serde_json::to_string(&read.payload.unwrap()).unwrap();

        assert!(serialized.contains("Ana García"));
        assert!(!serialized.contains("phone"));
        assert!(!serialized.contains("5551234"));
        assert!(!serialized.contains("Siempre Viva"));
    }
}
