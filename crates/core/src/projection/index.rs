//! Index projections: compact listings per collection.
//!
//! Each drops the fields a listing does not need. The person projection
//! additionally enforces a data-minimization contract: phones and
//! addresses never appear in the output type, whatever the input carries.

use serde::{Deserialize, Serialize};

use crate::model::{Category, Measure, Person, Product, Recipe};

/// Compact product row. Full details live behind the product detail tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductIndex {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub minimum_quantity: f64,
    pub cost: f64,
    pub sale_price: f64,
    pub is_low_stock: bool,
}

/// Project products to their index rows, sorted by id.
pub fn product_index(products: &[Product]) -> Vec<ProductIndex> {
    let mut rows: Vec<ProductIndex> = products
        .iter()
        .map(|p| ProductIndex {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            minimum_quantity: p.minimum_quantity,
            cost: p.cost,
            sale_price: p.sale_price,
            is_low_stock: p.quantity <= p.minimum_quantity,
        })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    rows
}

/// Compact recipe row. Full details live behind the recipe detail tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIndex {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub sale_price: f64,
    pub on_sale: bool,
    pub unit: f64,
    pub profit_percentage: f64,
    pub has_images: bool,
    pub categories: Vec<String>,
}

/// Project recipes to their index rows, sorted by id.
pub fn recipe_index(recipes: &[Recipe]) -> Vec<RecipeIndex> {
    let mut rows: Vec<RecipeIndex> = recipes
        .iter()
        .map(|r| RecipeIndex {
            id: r.id.clone(),
            name: r.name.clone(),
            cost: r.cost,
            sale_price: r.sale_price,
            on_sale: r.on_sale,
            unit: r.unit,
            profit_percentage: r.profit_percentage,
            has_images: !r.images.is_empty(),
            categories: r.categories.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    rows
}

/// Redacted person row: id, display name and tags only.
///
/// No phones, no addresses. The output type has no fields to hold them,
/// so upstream PII cannot leak through however the input looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonIndex {
    pub id: String,
    pub display_name: String,
    pub tags: Vec<String>,
}

/// Project persons to redacted index rows, sorted by id.
pub fn person_index(persons: &[Person]) -> Vec<PersonIndex> {
    let mut rows: Vec<PersonIndex> = persons
        .iter()
        .map(|p| PersonIndex { id: p.id.clone(), display_name: p.display_name(), tags: vec![p.kind.clone()] })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIndex {
    pub id: String,
    pub name: String,
}

/// Project categories, sorted by name with id tiebreak.
pub fn category_index(categories: &[Category]) -> Vec<CategoryIndex> {
    let mut rows: Vec<CategoryIndex> = categories
        .iter()
        .map(|c| CategoryIndex { id: c.id.clone(), name: c.name.clone() })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasureIndex {
    pub id: String,
    pub name: String,
    pub unit: String,
}

/// Project measures, sorted by id.
pub fn measure_index(measures: &[Measure]) -> Vec<MeasureIndex> {
    let mut rows: Vec<MeasureIndex> = measures
        .iter()
        .map(|m| MeasureIndex { id: m.id.clone(), name: m.name.clone(), unit: m.unit.clone() })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phone;

    fn product(id: &str, quantity: f64, minimum: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("product {id}"),
            quantity,
            minimum_quantity: minimum,
            cost: 1.0,
            sale_price: 2.0,
            measure: "m1".into(),
        }
    }

    #[test]
    fn test_product_index_sorted_and_flagged() {
        let rows = product_index(&[product("p2", 10.0, 5.0), product("p1", 3.0, 5.0)]);
        assert_eq!(rows[0].id, "p1");
        assert!(rows[0].is_low_stock);
        assert_eq!(rows[1].id, "p2");
        assert!(!rows[1].is_low_stock);
    }

    #[test]
    fn test_product_index_deterministic_over_unsorted_input() {
        let shuffled = [product("p3", 1.0, 0.0), product("p1", 1.0, 0.0), product("p2", 1.0, 0.0)];
        let reshuffled = [product("p2", 1.0, 0.0), product("p3", 1.0, 0.0), product("p1", 1.0, 0.0)];

        let first = serde_json::to_string(&product_index(&shuffled)).unwrap();
        let second = serde_json::to_string(&product_index(&reshuffled)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_person_index_never_carries_pii() {
        let person = Person {
            id: "c1".into(),
            name: "Ana".into(),
            last_name: "García".into(),
            kind: "CLIENT".into(),
            phones: vec![Phone { phone_number_prefix: "+54".into(), phone_number_suffix: "5551234".into() }],
            addresses: vec!["Av. Siempre Viva 742".into()],
        };

        let rows = person_index(&[person]);
        assert_eq!(rows[0].display_name, "Ana García");
        assert_eq!(rows[0].tags, vec!["CLIENT".to_string()]);

        let serialized = serde_json::to_string(&rows).unwrap();
        assert!(!serialized.contains("phone"));
        assert!(!serialized.contains("address"));
        assert!(!serialized.contains("5551234"));
        assert!(!serialized.contains("Siempre Viva"));
    }

    #[test]
    fn test_category_index_sorted_by_name() {
        let categories = [
            Category { id: "c2".into(), name: "tartas".into() },
            Category { id: "c1".into(), name: "alfajores".into() },
        ];
        let rows = category_index(&categories);
        assert_eq!(rows[0].name, "alfajores");
        assert_eq!(rows[1].name, "tartas");
    }

    #[test]
    fn test_recipe_index_has_images() {
        let with = Recipe { id: "r1".into(), images: vec!["a.jpg".into()], ..Default::default() };
        let without = Recipe { id: "r2".into(), ..Default::default() };
        let rows = recipe_index(&[with, without]);
        assert!(rows[0].has_images);
        assert!(!rows[1].has_images);
    }
}
