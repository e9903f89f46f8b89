//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_DULCE_*)
//! 2. TOML config file (if MCP_DULCE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::{ResourceKind, TtlPolicy};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MCP_DULCE_*)
/// 2. TOML config file (if MCP_DULCE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document store project identifier.
    ///
    /// Set via MCP_DULCE_STORE_PROJECT_ID environment variable.
    #[serde(default)]
    pub store_project_id: Option<String>,

    /// Bearer token for the document store REST API.
    ///
    /// Set via MCP_DULCE_STORE_TOKEN environment variable.
    #[serde(default)]
    pub store_token: Option<String>,

    /// Override for the document store base URL (emulator/testing).
    ///
    /// Set via MCP_DULCE_STORE_BASE_URL environment variable.
    #[serde(default)]
    pub store_base_url: Option<String>,

    /// User-Agent string for store requests.
    ///
    /// Set via MCP_DULCE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Store request timeout in milliseconds.
    ///
    /// Set via MCP_DULCE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Soft budget for one cached entry, in bytes.
    ///
    /// Exceeding it logs a warning; writes never fail on size.
    #[serde(default = "default_entry_warn_bytes")]
    pub entry_warn_bytes: usize,

    /// Soft ceiling for a projected payload, in bytes.
    ///
    /// Exceeding it logs a warning; the resource is still served.
    #[serde(default = "default_payload_warn_bytes")]
    pub payload_warn_bytes: usize,

    /// Threshold for the slow-computation warning, in milliseconds.
    #[serde(default = "default_slow_compute_ms")]
    pub slow_compute_ms: u64,

    /// Per-resource TTL overrides in seconds.
    ///
    /// Set via MCP_DULCE_TTL__PRODUCTS etc. (double underscore nesting).
    #[serde(default)]
    pub ttl: TtlOverrides,
}

/// Optional per-resource TTL overrides, in seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtlOverrides {
    #[serde(default)]
    pub products: Option<u64>,
    #[serde(default)]
    pub recipes: Option<u64>,
    #[serde(default)]
    pub persons: Option<u64>,
    #[serde(default)]
    pub movements: Option<u64>,
    #[serde(default)]
    pub clients: Option<u64>,
    #[serde(default)]
    pub categories: Option<u64>,
    #[serde(default)]
    pub measures: Option<u64>,
}

fn default_user_agent() -> String {
    "mcp-dulce/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_entry_warn_bytes() -> usize {
    400 * 1024
}

fn default_payload_warn_bytes() -> usize {
    512 * 1024
}

fn default_slow_compute_ms() -> u64 {
    1_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_project_id: None,
            store_token: None,
            store_base_url: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            entry_warn_bytes: default_entry_warn_bytes(),
            payload_warn_bytes: default_payload_warn_bytes(),
            slow_compute_ms: default_slow_compute_ms(),
            ttl: TtlOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MCP_DULCE_`
    /// 2. TOML file from `MCP_DULCE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MCP_DULCE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MCP_DULCE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the TTL table with any configured overrides applied.
    pub fn ttl_policy(&self) -> TtlPolicy {
        let overrides = [
            (ResourceKind::ProductsIndex, self.ttl.products),
            (ResourceKind::RecipesIndex, self.ttl.recipes),
            (ResourceKind::PersonsIndex, self.ttl.persons),
            (ResourceKind::MovementsLast30d, self.ttl.movements),
            (ResourceKind::ClientsRecent, self.ttl.clients),
            (ResourceKind::CategoriesIndex, self.ttl.categories),
            (ResourceKind::MeasuresIndex, self.ttl.measures),
        ];

        overrides
            .into_iter()
            .fold(TtlPolicy::default(), |policy, (kind, secs)| match secs {
                Some(secs) => policy.with_override(kind, Duration::from_secs(secs)),
                None => policy,
            })
    }

    /// Check that store credentials are configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the project id or token is not set.
    pub fn require_store_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let project = self.store_project_id.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "store_project_id".into(),
            hint: "Set MCP_DULCE_STORE_PROJECT_ID environment variable".into(),
        })?;
        let token = self.store_token.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "store_token".into(),
            hint: "Set MCP_DULCE_STORE_TOKEN environment variable".into(),
        })?;
        Ok((project, token))
    }
}
