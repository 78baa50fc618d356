//! Session commands.

use beez_core::Session;
use beez_storefront::error::AppError;
use beez_storefront::state::AppState;
use beez_storefront::storage::KeyValueStore;
use chrono::Utc;
use uuid::Uuid;

use crate::output;

/// Store a session the way the login flow does.
///
/// # Errors
///
/// Returns an error if the session cannot be persisted.
pub fn login<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    name: String,
    token: Option<String>,
    picture: Option<String>,
    email: Option<String>,
) -> Result<(), AppError> {
    let session = Session {
        name,
        profile_picture: picture,
        email,
        logged_in_at: Some(Utc::now()),
    };
    let token = token.unwrap_or_else(|| Uuid::new_v4().to_string());

    state.gate().establish(&session, &token)?;
    output::user_menu(&state.product_details(None).user_menu());
    Ok(())
}

/// Print the user menu.
pub fn whoami<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let page = state.product_details(None);
    output::user_menu(&page.user_menu());
    output::badge(page.cart_count());
}

/// Click "Log out".
///
/// # Errors
///
/// Returns an error if persistence cannot be cleared.
pub fn logout<S: KeyValueStore + Clone>(state: &AppState<S>) -> Result<(), AppError> {
    let mut page = state.product_details(None);
    let signed_out = page.sign_out()?;
    output::alert(&signed_out.alert());
    output::badge(page.cart_count());
    Ok(())
}
