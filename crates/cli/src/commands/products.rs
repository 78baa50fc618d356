//! Catalog browsing commands.

use std::path::Path;

use beez_core::ProductId;
use beez_storefront::catalog::Catalog;
use beez_storefront::error::AppError;
use beez_storefront::pages::ProductDetailsPage;
use beez_storefront::routes::Navigation;
use beez_storefront::state::AppState;
use beez_storefront::storage::KeyValueStore;

use crate::output;

/// Print the product list page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list<S: KeyValueStore + Clone>(state: &AppState<S>, catalog: &Path) -> Result<(), AppError> {
    let catalog = Catalog::load(catalog)?;
    output::cards(&state.product_list(&catalog).cards());
    Ok(())
}

/// Open a product from the list and print its detail page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no product `id`.
pub fn show<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    catalog: &Path,
    id: &ProductId,
) -> Result<(), AppError> {
    let page = open(state, catalog, id)?;
    output::product(&page.view());
    output::badge(page.cart_count());
    output::user_menu(&page.user_menu());
    Ok(())
}

/// Navigate from the product list to the detail page for `id`.
pub(crate) fn open<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    catalog: &Path,
    id: &ProductId,
) -> Result<ProductDetailsPage<S>, AppError> {
    let catalog = Catalog::load(catalog)?;
    let Some(Navigation::ProductDetails(product)) = state.product_list(&catalog).select(id) else {
        return Err(AppError::NotFound(format!("product {id}")));
    };
    Ok(state.product_details(Some(product)))
}
