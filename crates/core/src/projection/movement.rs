//! Movement aggregation for the last-30-days read view.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Movement;

/// One rollup row: all movements of one type on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementRollup {
    /// Calendar day, YYYY-MM-DD.
    pub date: String,
    /// Movement type, "unknown" when the record carries none.
    #[serde(rename = "type")]
    pub movement_type: String,
    /// Number of line items across the day's movements.
    pub qty: u64,
    /// Summed movement totals.
    pub total: f64,
}

/// Keep only movements dated within the 30 days before `now`.
///
/// Records with unparseable dates are dropped.
pub fn filter_last_30_days(movements: &[Movement], now: DateTime<Utc>) -> Vec<Movement> {
    let cutoff = now - Duration::days(30);
    movements
        .iter()
        .filter(|m| {
            DateTime::parse_from_rfc3339(&m.movement_date)
                .map(|date| date.with_timezone(&Utc) >= cutoff)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Group movements by (day, type) and accumulate item counts and totals.
///
/// Output is sorted most-recent-first, type ascending within a day.
pub fn aggregate_movements(movements: &[Movement]) -> Vec<MovementRollup> {
    let mut groups: BTreeMap<(String, String), (u64, f64)> = BTreeMap::new();

    for movement in movements {
        let date = movement.movement_date.get(..10).unwrap_or("").to_string();
        let movement_type = movement
            .movement_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let entry = groups.entry((date, movement_type)).or_insert((0, 0.0));
        entry.0 += movement.items.len() as u64;
        entry.1 += movement.total_amount;
    }

    let mut rows: Vec<MovementRollup> = groups
        .into_iter()
        .map(|((date, movement_type), (qty, total))| MovementRollup { date, movement_type, qty, total })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.movement_type.cmp(&b.movement_type)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovementItem, MovementType};

    fn movement(id: &str, kind: Option<MovementType>, date: &str, total: f64, items: usize) -> Movement {
        Movement {
            id: id.into(),
            movement_type: kind,
            person_id: "c1".into(),
            movement_date: date.into(),
            total_amount: total,
            items: vec![MovementItem::default(); items],
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_groups_by_day_and_type() {
        let movements = [
            movement("m1", Some(MovementType::Sale), "2026-07-15T10:00:00Z", 100.0, 2),
            movement("m2", Some(MovementType::Sale), "2026-07-15T16:00:00Z", 50.0, 1),
            movement("m3", Some(MovementType::Purchase), "2026-07-15T09:00:00Z", 30.0, 4),
            movement("m4", Some(MovementType::Sale), "2026-07-14T12:00:00Z", 80.0, 1),
        ];

        let rows = aggregate_movements(&movements);
        assert_eq!(rows.len(), 3);

        // most recent day first, PURCHASE before SALE within a day
        assert_eq!((rows[0].date.as_str(), rows[0].movement_type.as_str()), ("2026-07-15", "PURCHASE"));
        assert_eq!((rows[1].date.as_str(), rows[1].movement_type.as_str()), ("2026-07-15", "SALE"));
        assert_eq!(rows[1].qty, 3);
        assert_eq!(rows[1].total, 150.0);
        assert_eq!(rows[2].date, "2026-07-14");
    }

    #[test]
    fn test_aggregate_untyped_movements() {
        let rows = aggregate_movements(&[movement("m1", None, "2026-07-15T10:00:00Z", 10.0, 1)]);
        assert_eq!(rows[0].movement_type, "unknown");
    }

    #[test]
    fn test_aggregate_deterministic() {
        let a = [
            movement("m1", Some(MovementType::Sale), "2026-07-15T10:00:00Z", 100.0, 2),
            movement("m2", Some(MovementType::Purchase), "2026-07-14T09:00:00Z", 30.0, 1),
        ];
        let b = [a[1].clone(), a[0].clone()];

        let first = serde_json::to_string(&aggregate_movements(&a)).unwrap();
        let second = serde_json::to_string(&aggregate_movements(&b)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_last_30_days() {
        let now = DateTime::parse_from_rfc3339("2026-08-01T00:00:00Z").unwrap().with_timezone(&Utc);
        let movements = [
            movement("recent", Some(MovementType::Sale), "2026-07-20T10:00:00Z", 1.0, 1),
            movement("old", Some(MovementType::Sale), "2026-06-01T10:00:00Z", 1.0, 1),
            movement("garbled", Some(MovementType::Sale), "not-a-date", 1.0, 1),
        ];

        let kept = filter_last_30_days(&movements, now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "recent");
    }
}
