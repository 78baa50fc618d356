//! Shopping cart state.
//!
//! The cart is an ordered list of catalog products persisted under
//! [`keys::CART`]. Each page view hydrates its own copy at load, and every
//! successful add writes the full list back in a single `set`, so a reload
//! (or the next page) reproduces the same cart.
//!
//! Entries are unique by [`DedupKey`]: adding a product whose key is already
//! present is a no-op reported as [`AddOutcome::AlreadyPresent`].

use std::str::FromStr;

use beez_core::Product;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Attribute deciding whether two products are "the same" cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupKey {
    /// Compare product names. Two catalog products sharing a name collide.
    #[default]
    Name,
    /// Compare catalog identifiers.
    Id,
}

impl DedupKey {
    /// Whether `a` and `b` map to the same cart entry.
    #[must_use]
    pub fn same(self, a: &Product, b: &Product) -> bool {
        match self {
            Self::Name => a.name == b.name,
            Self::Id => a.id == b.id,
        }
    }
}

impl FromStr for DedupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            other => Err(format!("expected `name` or `id`, got `{other}`")),
        }
    }
}

/// Ordered cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<Product>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of [`CartStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product's key was already in the cart. Nothing was written.
    AlreadyPresent,
    /// The product was appended and the new cart persisted.
    Added(Cart),
}

/// Reads and mutates the persisted cart.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
    dedup: DedupKey,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store deduplicating by product name.
    pub fn new(store: S) -> Self {
        Self {
            store,
            dedup: DedupKey::default(),
        }
    }

    /// Use `dedup` to decide whether a product is already in the cart.
    #[must_use]
    pub const fn with_dedup_key(mut self, dedup: DedupKey) -> Self {
        self.dedup = dedup;
        self
    }

    /// The active deduplication key.
    #[must_use]
    pub const fn dedup_key(&self) -> DedupKey {
        self.dedup
    }

    /// Load the persisted cart.
    ///
    /// Missing, unreadable or malformed values all yield an empty cart.
    #[instrument(skip(self))]
    pub fn hydrate(&self) -> Cart {
        let raw = match self.store.get(keys::CART) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Option<Vec<Product>>>(&raw) {
            Ok(entries) => Cart {
                entries: entries.unwrap_or_default(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Malformed persisted cart, starting empty");
                Cart::new()
            }
        }
    }

    /// Whether `cart` already holds an entry with `product`'s key.
    #[must_use]
    pub fn contains(&self, cart: &Cart, product: &Product) -> bool {
        cart.iter().any(|entry| self.dedup.same(entry, product))
    }

    /// Append `product` unless its key is already present.
    ///
    /// On the `Added` path the full new cart is written in one `set` before
    /// returning; on `AlreadyPresent` nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the new cart could not be persisted. The
    /// previously persisted cart is left intact.
    #[instrument(skip(self, cart, product), fields(product = %product.name))]
    pub fn add(&self, cart: &Cart, product: &Product) -> Result<AddOutcome, StorageError> {
        if self.contains(cart, product) {
            tracing::debug!("Product already in cart");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let mut entries = Vec::with_capacity(cart.len() + 1);
        entries.extend_from_slice(cart.entries());
        entries.push(product.clone());
        let updated = Cart { entries };

        let serialized = serde_json::to_string(&updated)?;
        self.store.set(keys::CART, &serialized).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist cart");
        })?;

        tracing::info!(count = updated.len(), "Added product to cart");
        let product_id = product.id.to_string();
        add_breadcrumb(
            "cart",
            "Added product to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        Ok(AddOutcome::Added(updated))
    }

    /// Remove the persisted cart. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::CART)
    }

    /// Number of entries, as shown on the cart badge.
    #[must_use]
    pub fn count(cart: &Cart) -> usize {
        cart.len()
    }
}
