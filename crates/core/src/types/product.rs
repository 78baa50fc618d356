//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A product as supplied by the external catalog.
///
/// Storefront code never creates or edits products; it only holds them (for
/// example inside the cart) and persists them in the same record shape the
/// catalog uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name. Also the cart's default deduplication key.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Image reference (absolute URL).
    #[serde(default)]
    pub image_url: String,
}

impl Product {
    /// Create a product with an empty description and image reference.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: String::new(),
            image_url: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}
