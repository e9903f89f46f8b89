//! Resource identifiers and per-resource TTL policy.
//!
//! The TTL table is resolved once at construction into an explicit
//! enum-keyed mapping; nothing parses URIs on the request path.

use std::collections::HashMap;
use std::time::Duration;

/// Conservative fallback for kinds without an explicit TTL entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// One cacheable read view.
///
/// Each kind maps to a stable URI in the resource catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    ProductsIndex,
    RecipesIndex,
    PersonsIndex,
    MovementsLast30d,
    ClientsRecent,
    CategoriesIndex,
    MeasuresIndex,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::ProductsIndex,
        ResourceKind::RecipesIndex,
        ResourceKind::PersonsIndex,
        ResourceKind::MovementsLast30d,
        ResourceKind::ClientsRecent,
        ResourceKind::CategoriesIndex,
        ResourceKind::MeasuresIndex,
    ];

    /// Stable URI naming this read view.
    pub fn uri(self) -> &'static str {
        match self {
            ResourceKind::ProductsIndex => "dulce://products#index",
            ResourceKind::RecipesIndex => "dulce://recipes#index",
            ResourceKind::PersonsIndex => "dulce://persons#index",
            ResourceKind::MovementsLast30d => "dulce://movements#last-30d",
            ResourceKind::ClientsRecent => "dulce://clients#recent",
            ResourceKind::CategoriesIndex => "dulce://categories#index",
            ResourceKind::MeasuresIndex => "dulce://measures#index",
        }
    }

    /// Resolve a catalog URI back to its kind.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.uri() == uri)
    }
}

/// Per-resource TTL table.
///
/// Frequently-changing aggregates get short TTLs, rarely-changing indexes
/// long ones. Kinds absent from the table fall back to [`DEFAULT_TTL`].
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    ttls: HashMap<ResourceKind, Duration>,
    default_ttl: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        let ttls = HashMap::from([
            (ResourceKind::ProductsIndex, Duration::from_secs(60)),
            (ResourceKind::RecipesIndex, Duration::from_secs(5 * 60)),
            (ResourceKind::PersonsIndex, Duration::from_secs(15 * 60)),
            (ResourceKind::MovementsLast30d, Duration::from_secs(60)),
            (ResourceKind::ClientsRecent, Duration::from_secs(2 * 60)),
            (ResourceKind::CategoriesIndex, Duration::from_secs(15 * 60)),
            (ResourceKind::MeasuresIndex, Duration::from_secs(15 * 60)),
        ]);
        Self { ttls, default_ttl: DEFAULT_TTL }
    }
}

impl TtlPolicy {
    /// TTL for a resource kind, falling back to the conservative default.
    pub fn ttl_for(&self, kind: ResourceKind) -> Duration {
        self.ttls.get(&kind).copied().unwrap_or(self.default_ttl)
    }

    /// Replace the TTL for one kind.
    pub fn with_override(mut self, kind: ResourceKind, ttl: Duration) -> Self {
        self.ttls.insert(kind, ttl);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_uri(kind.uri()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_uri() {
        assert_eq!(ResourceKind::from_uri("dulce://nope#index"), None);
        assert_eq!(ResourceKind::from_uri(""), None);
    }

    #[test]
    fn test_default_ttls() {
        let policy = TtlPolicy::default();
        assert_eq!(policy.ttl_for(ResourceKind::ProductsIndex), Duration::from_secs(60));
        assert_eq!(policy.ttl_for(ResourceKind::PersonsIndex), Duration::from_secs(900));
        assert_eq!(policy.ttl_for(ResourceKind::MovementsLast30d), Duration::from_secs(60));
    }

    #[test]
    fn test_override() {
        let policy = TtlPolicy::default().with_override(ResourceKind::ProductsIndex, Duration::from_secs(5));
        assert_eq!(policy.ttl_for(ResourceKind::ProductsIndex), Duration::from_secs(5));
        assert_eq!(policy.ttl_for(ResourceKind::RecipesIndex), Duration::from_secs(300));
    }
}
