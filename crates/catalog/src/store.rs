//! Catalog store: the loaded product list and its fetch status.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, first_duplicate};

use crate::product::{CatalogError, Product};
use crate::source::CatalogSource;

/// Result of one catalog fetch.
pub type LoadOutcome = Result<Vec<Product>, CatalogError>;

/// Fetch status lifecycle. Transitions only move forward:
/// `NotStarted -> Loading -> Ready | Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    #[default]
    NotStarted,
    Loading,
    Ready,
    Failed { message: String },
}

impl CatalogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogStatus::NotStarted => "not_started",
            CatalogStatus::Loading => "loading",
            CatalogStatus::Ready => "ready",
            CatalogStatus::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    BeginLoad,
    Resolve(LoadOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    LoadStarted,
    LoadSucceeded { products: Vec<Product> },
    LoadFailed { message: String },
}

/// Store owning the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    status: CatalogStatus,
    products: Vec<Product>,
    version: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that is already `Ready` with the given products.
    pub fn ready(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.begin_load();
        store.resolve(Ok(products));
        store
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Error message, present only when the load failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    /// Move `NotStarted -> Loading`.
    ///
    /// Returns `true` when the caller must start the (single) fetch; any later
    /// call is a no-op returning `false`.
    pub fn begin_load(&mut self) -> bool {
        let started = match self.execute(&CatalogCommand::BeginLoad) {
            Ok(events) => !events.is_empty(),
            Err(never) => match never {},
        };
        if started {
            tracing::info!("catalog load started");
        } else {
            tracing::debug!(status = self.status.as_str(), "catalog load already triggered; ignoring");
        }
        started
    }

    /// Record the outcome of the fetch started by `begin_load`.
    ///
    /// Ignored unless the store is `Loading`.
    pub fn resolve(&mut self, outcome: LoadOutcome) {
        let events = match self.execute(&CatalogCommand::Resolve(outcome)) {
            Ok(events) => events,
            Err(never) => match never {},
        };
        match events.first() {
            Some(CatalogEvent::LoadSucceeded { products }) => {
                if let Some(dup) = first_duplicate(products) {
                    tracing::warn!(product_id = %dup.id, "catalog contains a repeated product id; keeping every row");
                }
                tracing::info!(products = products.len(), "catalog ready");
            }
            Some(CatalogEvent::LoadFailed { message }) => {
                tracing::warn!(error = %message, "catalog load failed");
            }
            _ => {
                tracing::warn!(status = self.status.as_str(), "ignoring catalog resolution outside of loading");
            }
        }
    }

    /// Trigger the load and await it. Does nothing once the load was triggered.
    ///
    /// Returns whether a fetch was performed.
    pub async fn load<S>(&mut self, source: &S) -> bool
    where
        S: CatalogSource + ?Sized,
    {
        if !self.begin_load() {
            return false;
        }
        let outcome = source.fetch_products().await;
        self.resolve(outcome);
        true
    }
}

impl Aggregate for CatalogStore {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::LoadStarted => {
                self.status = CatalogStatus::Loading;
            }
            CatalogEvent::LoadSucceeded { products } => {
                self.products = products.clone();
                self.status = CatalogStatus::Ready;
            }
            CatalogEvent::LoadFailed { message } => {
                self.status = CatalogStatus::Failed {
                    message: message.clone(),
                };
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::BeginLoad => match self.status {
                CatalogStatus::NotStarted => Ok(vec![CatalogEvent::LoadStarted]),
                _ => Ok(vec![]),
            },
            CatalogCommand::Resolve(outcome) => {
                if !self.is_loading() {
                    return Ok(vec![]);
                }
                let event = match outcome {
                    Ok(products) => CatalogEvent::LoadSucceeded {
                        products: products.clone(),
                    },
                    Err(err) => CatalogEvent::LoadFailed {
                        message: err.message.clone(),
                    },
                };
                Ok(vec![event])
            }
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}
