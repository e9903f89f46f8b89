//! Raw entity models, one tagged struct per store collection.
//!
//! Documents are decoded at the store boundary into these shapes; missing
//! or malformed fields default instead of propagating holes downstream.
//! Field names mirror the store's camelCase document fields.

pub mod movement;
pub mod recipe;

use serde::{Deserialize, Serialize};

pub use movement::{Movement, MovementItem, MovementType};
pub use recipe::{Recipe, RecipeProduct, RecipeRef, RecipeSection};

/// Decode a document's fields, falling back to an all-default entity on a
/// malformed document, then stamp the document id.
fn decode_with_id<T: Default + serde::de::DeserializeOwned>(id: impl Into<String>, fields: serde_json::Value) -> (String, T) {
    let id = id.into();
    let entity = serde_json::from_value(fields).unwrap_or_else(|e| {
        tracing::warn!(id = %id, error = %e, "malformed document, using defaults");
        T::default()
    });
    (id, entity)
}

/// A sellable or stocked product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_deserializing)]
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub minimum_quantity: f64,
    pub cost: f64,
    pub sale_price: f64,
    /// Measure document id, resolved on detail reads.
    pub measure: String,
}

impl Product {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut product): (String, Product) = decode_with_id(id, fields);
        product.id = id;
        product
    }
}

/// A person record. Phones and addresses are PII and must never reach
/// index projections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_deserializing)]
    pub id: String,
    pub name: String,
    pub last_name: String,
    /// CLIENT, PROVIDER, etc.
    #[serde(rename = "type")]
    pub kind: String,
    pub phones: Vec<Phone>,
    pub addresses: Vec<String>,
}

impl Person {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut person): (String, Person) = decode_with_id(id, fields);
        person.id = id;
        person
    }

    /// Display name used by read views.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Phone {
    pub phone_number_prefix: String,
    pub phone_number_suffix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    #[serde(skip_deserializing)]
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut category): (String, Category) = decode_with_id(id, fields);
        category.id = id;
        category
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Measure {
    #[serde(skip_deserializing)]
    pub id: String,
    pub name: String,
    pub unit: String,
}

impl Measure {
    pub fn from_fields(id: impl Into<String>, fields: serde_json::Value) -> Self {
        let (id, mut measure): (String, Measure) = decode_with_id(id, fields);
        measure.id = id;
        measure
    }
}
