//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::{search::DEFAULT_SUGGESTION_LIMIT, Currency};
use storefront_observability::{LogFormat, LogLevel};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Shopper session and its storage.
    #[serde(default)]
    pub session: SessionConfig,

    /// Search box behaviour.
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// The configured cart currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.session.currency)
            .with_context(|| format!("Unknown currency: {}", self.session.currency))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding an array of products.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session id; cart and wish list are kept under it.
    #[serde(default = "default_session_id")]
    pub id: String,

    /// Directory for session state and order receipts.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// ISO currency code for cart totals.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_session_id() -> String {
    "local".to_string()
}

fn default_store_dir() -> String {
    ".storefront/store".to_string()
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            id: default_session_id(),
            store_dir: default_store_dir(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results shown for a plain search.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
# JSON array of products, relative to this file's directory
path = "{catalog}"

[session]
id = "{session}"
store_dir = "{store}"
currency = "{currency}"

[search]
suggestion_limit = {limit}

[logging]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
level = "info"
# human | json
format = "human"
"#,
        catalog = default_catalog_path(),
        session = default_session_id(),
        store = default_store_dir(),
        currency = default_currency(),
        limit = DEFAULT_SUGGESTION_LIMIT,
    )
}
