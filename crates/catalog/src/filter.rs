//! Listing filters and the values derived from the catalog for them.
//!
//! Everything here is computed on read from the product list; nothing is
//! cached in a store.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Price, ValueObject};

use crate::product::Product;

const FIFTY: Price = Price::from_whole_dollars(50);
const ONE_HUNDRED: Price = Price::from_whole_dollars(100);

/// Category selection: everything, or one category tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category == *name,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => CategoryFilter::All,
            other => CategoryFilter::Named(other.to_string()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Named(name) => name,
        }
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price bucket selection.
///
/// `From50To100` is inclusive at both ends. The other buckets are strict, so
/// $50 and $100 land in `From50To100`; see [`PriceRange::bucket_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "under50")]
    Under50,
    #[serde(rename = "50to100")]
    From50To100,
    #[serde(rename = "above100")]
    Above100,
}

impl PriceRange {
    /// Options in display order.
    pub const ALL_RANGES: [PriceRange; 4] = [
        PriceRange::All,
        PriceRange::Under50,
        PriceRange::From50To100,
        PriceRange::Above100,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PriceRange::All => "all",
            PriceRange::Under50 => "under50",
            PriceRange::From50To100 => "50to100",
            PriceRange::Above100 => "above100",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceRange::All => "All Prices",
            PriceRange::Under50 => "Under $50",
            PriceRange::From50To100 => "$50 to $100",
            PriceRange::Above100 => "Above $100",
        }
    }

    pub fn contains(self, price: Price) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::Under50 => price < FIFTY,
            PriceRange::From50To100 => price >= FIFTY && price <= ONE_HUNDRED,
            PriceRange::Above100 => price > ONE_HUNDRED,
        }
    }

    /// The single bucket a price belongs to, checking buckets in the order
    /// `Under50`, `From50To100`, `Above100`. Ties at $50 and $100 go to
    /// `From50To100`.
    pub fn bucket_for(price: Price) -> PriceRange {
        [PriceRange::Under50, PriceRange::From50To100, PriceRange::Above100]
            .into_iter()
            .find(|range| range.contains(price))
            .unwrap_or(PriceRange::Above100)
    }
}

impl FromStr for PriceRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceRange::ALL_RANGES
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown price range: {s}")))
    }
}

impl core::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View-local filter state of the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
}

impl FilterSelection {
    pub fn new(category: CategoryFilter, price_range: PriceRange) -> Self {
        Self {
            category,
            price_range,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.price_range.contains(product.price)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.price_range == PriceRange::All
    }
}

impl ValueObject for FilterSelection {}

/// Products passing both filters, in catalog order.
pub fn filter_products<'a>(products: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    products.iter().filter(|p| selection.matches(p)).collect()
}

/// `All` followed by each distinct category in first-seen order.
pub fn category_options(products: &[Product]) -> Vec<CategoryFilter> {
    let mut seen = HashSet::new();
    let mut options = vec![CategoryFilter::All];
    options.extend(
        products
            .iter()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| CategoryFilter::Named(p.category.clone())),
    );
    options
}
