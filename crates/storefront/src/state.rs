//! Application state shared across page views.

use beez_core::Product;
use url::Url;

use crate::cart::{CartStore, DedupKey};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::pages::{ProductDetailsPage, ProductListPage, SignupPage};
use crate::session::{AuthPolicy, SessionGate};
use crate::signup::{SignupClient, SignupError};
use crate::storage::KeyValueStore;

/// Application state shared across all page views.
///
/// Holds the injected persistence backend and the policies every page uses.
/// Each page built from it hydrates its own copy of cart and session; nothing
/// else is shared in memory.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    store: S,
    auth_policy: AuthPolicy,
    dedup_key: DedupKey,
    signup_url: Url,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Create state with default configuration.
    pub fn new(store: S) -> Self {
        Self::from_config(store, &StorefrontConfig::default())
    }

    /// Create state with the policies and endpoints from `config`.
    pub fn from_config(store: S, config: &StorefrontConfig) -> Self {
        Self {
            store,
            auth_policy: config.auth_policy,
            dedup_key: config.dedup_key,
            signup_url: config.signup_url.clone(),
        }
    }

    /// Get a reference to the persistence backend.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// A cart store over the shared backend.
    #[must_use]
    pub fn carts(&self) -> CartStore<S> {
        CartStore::new(self.store.clone()).with_dedup_key(self.dedup_key)
    }

    /// A session gate over the shared backend.
    #[must_use]
    pub fn gate(&self) -> SessionGate<S> {
        SessionGate::new(self.store.clone()).with_policy(self.auth_policy)
    }

    /// Open the product detail page. `product` is whatever the previous page
    /// passed along, if anything.
    #[must_use]
    pub fn product_details(&self, product: Option<Product>) -> ProductDetailsPage<S> {
        ProductDetailsPage::load(self.carts(), self.gate(), product)
    }

    /// Open the product list page.
    #[must_use]
    pub const fn product_list<'a>(&self, catalog: &'a Catalog) -> ProductListPage<'a> {
        ProductListPage::new(catalog)
    }

    /// Open the signup page posting to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn signup(&self) -> Result<SignupPage, SignupError> {
        Ok(SignupPage::new(SignupClient::new(self.signup_url.clone())?))
    }
}
