//! Catalog module: products, the catalog store, catalog sources, and the
//! filter/derivation logic used by the listing page.
//!
//! Everything except the sources is deterministic domain logic (no IO).

pub mod filter;
pub mod product;
pub mod source;
pub mod store;

pub use filter::{CategoryFilter, FilterSelection, PriceRange, category_options, filter_products};
pub use product::{CatalogError, Product};
pub use source::{CatalogSource, JsonCatalogSource, StaticCatalogSource, parse_catalog};
#[cfg(feature = "http")]
pub use source::HttpCatalogSource;
pub use store::{CatalogCommand, CatalogEvent, CatalogStatus, CatalogStore, LoadOutcome};
