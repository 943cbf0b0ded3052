use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{Entity, Price, ProductId};

/// A catalog product.
///
/// Field names follow the catalog provider's JSON shape; fields the storefront
/// does not use (e.g. `rating`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            category: category.into(),
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog fetch failure. The message is shown to the user verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct CatalogError {
    pub message: String,
}

impl CatalogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
