//! Movements last-30-days rollup resource.

use chrono::{Duration, Utc};
use dulce_core::{Error, ResourceKind, model::Movement, projection};
use dulce_store::{CollectionQuery, FilterOp};
use serde_json::json;

use super::provider::{ConditionalRead, ResourceRead, read_through, store_error, to_payload};
use crate::handler::AppState;

/// Upper bound on one movement fetch.
const MOVEMENTS_LIMIT: u32 = 500;

pub async fn movements_last_30d(state: &AppState, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    read_through(state, ResourceKind::MovementsLast30d, cond, || async {
        let now = Utc::now();
        let cutoff = (now - Duration::days(30)).to_rfc3339();

        let docs = state
            .store
            .query(
                CollectionQuery::new("movements")
                    .filter("movementDate", FilterOp::Gte, json!(cutoff))
                    .order_desc("movementDate")
                    .limit(MOVEMENTS_LIMIT),
            )
            .await
            .map_err(store_error)?;

        let movements: Vec<Movement> =
            docs.into_iter().map(|doc| Movement::from_fields(doc.id, doc.fields)).collect();

        // the query bounds the fetch; the window is enforced locally so
        // records with unparseable dates never reach the rollup
        let recent = projection::filter_last_30_days(&movements, now);
        to_payload(&projection::aggregate_movements(&recent))
    })
    .await
}
