//! Catalog providers.
//!
//! The store never fetches on its own; the shell hands it a `CatalogSource`
//! when the load is triggered.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::product::{CatalogError, Product};

/// Read-only provider of the product list.
///
/// Browser futures are not `Send`, so the bound is relaxed on wasm32.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogSource {
    /// Fetch the full product list. Takes no parameters.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Decode a catalog payload (a JSON array of products).
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::new(format!("invalid catalog payload: {e}")))
}

/// In-memory source returning a fixed outcome. Counts fetches.
#[derive(Debug)]
pub struct StaticCatalogSource {
    outcome: Result<Vec<Product>, CatalogError>,
    fetch_calls: AtomicUsize,
}

impl StaticCatalogSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            outcome: Ok(products),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(CatalogError::new(message)),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_products` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Source backed by a JSON document (bundled fixture, file contents, ...).
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    body: String,
}

impl JsonCatalogSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for JsonCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        parse_catalog(&self.body)
    }
}

/// HTTP source: `GET <url>` returning the catalog JSON array.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        tracing::debug!(url = %self.url, "fetching catalog");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::new(format!("network error: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::new(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        resp.json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::new(format!("invalid catalog payload: {e}")))
    }
}
