//! Client recency rollup: who bought recently, how often, for how much.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::{Movement, MovementType, Person};

/// Purchase activity for one client over the aggregation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientActivity {
    pub id: String,
    pub display_name: String,
    /// Person type, CLIENT when the record carries none.
    #[serde(rename = "type")]
    pub kind: String,
    /// Day of the most recent purchase, YYYY-MM-DD.
    pub last_purchase: String,
    pub purchase_count: u64,
    /// Summed sale totals, rounded to cents.
    pub total_spent: f64,
}

/// Group sale movements by person and join against the person records.
///
/// Movements without a person id or with a non-sale type are skipped, as
/// are person ids with no matching record. Output is sorted by most
/// recent purchase, id ascending as tiebreak.
pub fn aggregate_client_purchases(persons: &HashMap<String, Person>, movements: &[Movement]) -> Vec<ClientActivity> {
    let mut stats: BTreeMap<&str, (String, u64, f64)> = BTreeMap::new();

    for movement in movements {
        if movement.person_id.is_empty() || movement.movement_type != Some(MovementType::Sale) {
            continue;
        }

        let day = movement.movement_date.get(..10).unwrap_or("").to_string();
        let entry = stats.entry(movement.person_id.as_str()).or_insert((String::new(), 0, 0.0));
        if day > entry.0 {
            entry.0 = day;
        }
        entry.1 += 1;
        entry.2 += movement.total_amount;
    }

    let mut rows: Vec<ClientActivity> = stats
        .into_iter()
        .filter_map(|(person_id, (last_purchase, purchase_count, total_spent))| {
            let person = persons.get(person_id)?;
            Some(ClientActivity {
                id: person_id.to_string(),
                display_name: person.display_name(),
                kind: if person.kind.is_empty() { "CLIENT".to_string() } else { person.kind.clone() },
                last_purchase,
                purchase_count,
                total_spent: (total_spent * 100.0).round() / 100.0,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.last_purchase.cmp(&a.last_purchase).then_with(|| a.id.cmp(&b.id)));
    rows
}
