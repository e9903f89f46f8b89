//! Cacheable resource providers.
//!
//! One provider per catalog resource, all built on the shared
//! read-through orchestration in [`provider`]: check cache, fetch and
//! project on a miss, store, respond with conditional-read validators.

pub mod categories;
pub mod clients;
pub mod measures;
pub mod movements;
pub mod persons;
pub mod products;
pub mod provider;
pub mod recipes;
pub mod version_manifest;

use dulce_core::{Error, ResourceKind};

use crate::handler::AppState;
use provider::{ConditionalRead, ResourceRead};

/// One row of the read-only resource catalog exposed to callers.
pub struct CatalogEntry {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub media_type: &'static str,
}

/// The fixed resource catalog.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        uri: "dulce://products#index",
        name: "Products index",
        description: "Compact product listing with stock levels and low-stock flags",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://recipes#index",
        name: "Recipes index",
        description: "Compact recipe listing with costing data",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://persons#index",
        name: "Persons index",
        description: "Redacted person listing: id, display name and tags, no contact data",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://movements#last-30d",
        name: "Movements, last 30 days",
        description: "Movement rollup per day and type over the last 30 days",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://clients#recent",
        name: "Recent clients",
        description: "Clients with purchases in the last 30 days, with recency statistics",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://categories#index",
        name: "Categories index",
        description: "Category listing",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: "dulce://measures#index",
        name: "Measures index",
        description: "Measure listing with units",
        media_type: "application/json",
    },
    CatalogEntry {
        uri: version_manifest::URI,
        name: "Version manifest",
        description: "ETags and data versions of all live cache entries, for bulk staleness checks",
        media_type: "application/json",
    },
];

/// Dispatch a resource read by catalog URI.
pub async fn read_by_uri(state: &AppState, uri: &str, cond: &ConditionalRead) -> Result<ResourceRead, Error> {
    if uri == version_manifest::URI {
        return version_manifest::manifest(state).await;
    }

    let Some(kind) = ResourceKind::from_uri(uri) else {
        return Err(Error::NotFound(format!("unknown resource: {uri}")));
    };

    match kind {
        ResourceKind::ProductsIndex => products::products_index(state, cond).await,
        ResourceKind::RecipesIndex => recipes::recipes_index(state, cond).await,
        ResourceKind::PersonsIndex => persons::persons_index(state, cond).await,
        ResourceKind::MovementsLast30d => movements::movements_last_30d(state, cond).await,
        ResourceKind::ClientsRecent => clients::clients_recent(state, cond).await,
        ResourceKind::CategoriesIndex => categories::categories_index(state, cond).await,
        ResourceKind::MeasuresIndex => measures::measures_index(state, cond).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_uris_resolve() {
        for entry in CATALOG {
            let known = ResourceKind::from_uri(entry.uri).is_some() || entry.uri == version_manifest::URI;
            assert!(known, "catalog entry {} does not dispatch", entry.uri);
        }
    }

    #[test]
    fn test_catalog_covers_every_kind() {
        for kind in ResourceKind::ALL {
            assert!(CATALOG.iter().any(|entry| entry.uri == kind.uri()), "{:?} missing from catalog", kind);
        }
    }
}
