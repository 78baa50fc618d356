//! Cart commands.

use std::path::Path;

use beez_core::ProductId;
use beez_storefront::error::AppError;
use beez_storefront::pages::CartAction;
use beez_storefront::state::AppState;
use beez_storefront::storage::KeyValueStore;

use crate::commands::products;
use crate::output;

/// Click "Add to Cart" on the detail page for `id`.
///
/// # Errors
///
/// Returns an error if the product is unknown or the cart cannot be saved.
pub fn add<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    catalog: &Path,
    id: &ProductId,
) -> Result<(), AppError> {
    let mut page = products::open(state, catalog, id)?;

    if let Some(result) = page.add_to_cart()? {
        output::alert(&result.alert);
        if let CartAction::Unauthenticated(_) = result.action {
            tracing::debug!("Add to cart rejected, no session");
        }
    }
    output::badge(page.cart_count());
    Ok(())
}

/// Print the cart.
pub fn show<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let page = state.product_details(None);
    output::cart(page.cart());
}
