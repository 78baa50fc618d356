//! Product list page.

use beez_core::ProductId;

use crate::catalog::Catalog;
use crate::routes::Navigation;

/// One tile in the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Stable key for the tile.
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

/// Grid of catalog products.
#[derive(Debug, Clone, Copy)]
pub struct ProductListPage<'a> {
    catalog: &'a Catalog,
}

impl<'a> ProductListPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Tiles in catalog order.
    #[must_use]
    pub fn cards(&self) -> Vec<ProductCard> {
        self.catalog
            .products()
            .iter()
            .map(|p| ProductCard {
                id: p.id.clone(),
                name: p.name.clone(),
                price: p.price.display(),
                image_url: p.image_url.clone(),
            })
            .collect()
    }

    /// Open the detail page for `id`, carrying the product along.
    #[must_use]
    pub fn select(&self, id: &ProductId) -> Option<Navigation> {
        self.catalog
            .get(id)
            .cloned()
            .map(Navigation::ProductDetails)
    }
}
