//! Recent-clients rollup resource.
//!
//! Sale movements from the last 30 days are joined against the persons
//! collection. The person sub-fetches run concurrently and the join
//! completes before aggregation starts.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, Utc};
use dulce_core::{
    Error, ResourceKind,
    model::{Movement, Person},
    projection,
};
use dulce_store::{CollectionQuery, FilterOp};
use futures_util::future::try_join_all;
use serde_json::json;

use super::provider::{ConditionalRead, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

const MOVEMENTS_LIMIT: u32 = 500;

pub async fn clients_recent(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::ClientsRecent, cond, || async {
        let cutoff = (Utc::now() - Duration::days(30)).to_rfc3339();

        let docs = state
            .store
            .query(
                CollectionQuery::new("movements")
                    .filter("type", FilterOp::Eq, json!("SALE"))
                    .filter("movementDate", FilterOp::Gte, json!(cutoff))
                    .limit(MOVEMENTS_LIMIT),
            )
            .await
            .map_err(store_error)?;

        let movements: Vec<Movement> =
            docs.into_iter().map(|doc| Movement::from_fields(doc.id, doc.fields)).collect();

        let person_ids: BTreeSet<&str> = movements
            .iter()
            .filter(|m| !m.person_id.is_empty())
            .map(|m| m.person_id.as_str())
            .collect();

        let fetched = try_join_all(person_ids.iter().map(|id| state.store.get("persons", id)))
            .await
            .map_err(store_error)?;

        let persons: HashMap<String, Person> = fetched
            .into_iter()
            .flatten()
            .map(|doc| {
                let person = Person::from_fields(doc.id, doc.fields);
                (person.id.clone(), person)
            })
            .collect();

        to_payload(&projection::aggregate_client_purchases(&persons, &movements))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_core::AppConfig;
    use dulce_store::MemoryStore;
    use std::sync::Arc;

    fn days_ago(days: i64) -> String {
        (Utc::now() - Duration::days(days)).to_rfc3339()
    }

    #[tokio::test]
    async fn test_rollup_joins_persons() {
        let store = Arc::new(MemoryStore::new());
        store.insert("persons", "c1", json!({"name": "Ana", "lastName": "García", "type": "CLIENT"})).await;
        store
            .insert(
                "movements",
                "m1",
                json!({"type": "SALE", "personId": "c1", "movementDate": days_ago(3), "totalAmount": 120.0}),
            )
            .await;
        store
            .insert(
                "movements",
                "m2",
                json!({"type": "SALE", "personId": "c1", "movementDate": days_ago(1), "totalAmount": 80.0}),
            )
            .await;
        let state = AppState::new(AppConfig::default(), store);

        let read = clients_recent(&state, &ConditionalRead::default()).await.unwrap();
        let rows = read.payload.unwrap();

        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["id"], "c1");
        assert_eq!(rows[0]["displayName"], "Ana García");
        assert_eq!(rows[0]["purchaseCount"], 2);
        assert_eq!(rows[0]["totalSpent"], 200.0);
    }

    #[tokio::test]
    async fn test_rollup_skips_unknown_persons() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                "movements",
                "m1",
                json!({"type": "SALE", "personId": "ghost", "movementDate": days_ago(1), "totalAmount": 10.0}),
            )
            .await;
        let state = AppState::new(AppConfig::default(), store);

        let read = clients_recent(&state, &ConditionalRead::default()).await.unwrap();
        assert!(read.payload.unwrap().as_array().unwrap().is_empty());
    }
}
