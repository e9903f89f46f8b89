//! Stock and sales movement entities.

use serde::{Deserialize, Serialize};

use super::decode_with_id;

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Purchase,
    Sale,
}

impl MovementType {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Purchase => "PURCHASE",
            MovementType::Sale => "SALE",
        }
    }
}

/// One inventory movement: a purchase or a sale with its line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Movement {
    #[serde(skip_deserializing)]
    pub id: String,
    #[serde(rename = "type")]
    pub movement_type: Option<MovementType>,
    pub person_id: String,
    /// RFC 3339 timestamp.
    pub movement_date: String,
    pub total_amount: f64,
    pub items: Vec<MovementItem>,
    pub detail: String,
    pub kitchen_order_status: Option<String>,
    pub is_stock: Option<bool>,
}

/// One line of a movement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovementItem {
    /// Source collection of the item ("products" or "recipes").
    pub collection: String,
    pub collection_id: String,
    pub custom_name: Option<String>,
    pub cost: f64,
    pub quantity: f64,
}

impl Movement {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut movement): (String, Movement) = decode_with_id(id, fields);
        movement.id = id;
        movement
    }
}
