//! Storefront configuration (defaults + environment overrides).

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use storefront_observability::LogFormat;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_DESCRIPTION_PREVIEW: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Endpoint returning the catalog JSON array.
    pub catalog_url: String,
    /// Characters of a product description shown on its card.
    pub description_preview_len: usize,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            description_preview_len: DEFAULT_DESCRIPTION_PREVIEW,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Defaults overridden by `STOREFRONT_CATALOG_URL`,
    /// `STOREFRONT_DESCRIPTION_PREVIEW` and `STOREFRONT_LOG_FORMAT`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            let url = url.trim();
            if url.is_empty() {
                bail!("STOREFRONT_CATALOG_URL is set but empty");
            }
            config.catalog_url = url.to_string();
        }

        if let Some(raw) = lookup("STOREFRONT_DESCRIPTION_PREVIEW") {
            config.description_preview_len = raw
                .trim()
                .parse()
                .with_context(|| format!("STOREFRONT_DESCRIPTION_PREVIEW must be a number, got {raw:?}"))?;
        }

        if let Some(raw) = lookup("STOREFRONT_LOG_FORMAT") {
            config.log_format = LogFormat::parse(&raw)
                .with_context(|| format!("STOREFRONT_LOG_FORMAT must be `json` or `pretty`, got {raw:?}"))?;
        }

        Ok(config)
    }

    /// Install the tracing subscriber in the configured format.
    ///
    /// Native only: the browser build has no subscriber.
    pub fn init_tracing(&self) {
        storefront_observability::init_with(self.log_format);
    }
}
