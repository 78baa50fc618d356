//! Signup command.

use beez_storefront::error::AppError;
use beez_storefront::pages::{SignupField, SignupOutcome};
use beez_storefront::state::AppState;
use beez_storefront::storage::KeyValueStore;

use crate::output;

/// Fill in and submit the signup form.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the signup fails.
pub async fn run<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    name: String,
    email: String,
    phone: String,
    password: String,
) -> Result<(), AppError> {
    let mut page = state.signup()?;
    page.set_field(SignupField::Name, name);
    page.set_field(SignupField::Email, email);
    page.set_field(SignupField::Phone, phone);
    page.set_field(SignupField::Password, password);

    let outcome = page.submit().await;
    if let Some(alert) = outcome.alert() {
        output::alert(&alert);
    }
    if let Some(next) = outcome.navigation() {
        tracing::info!(route = next.route().path(), "Continue at login");
    }

    match outcome {
        SignupOutcome::Created => Ok(()),
        SignupOutcome::Failed(e) => Err(e.into()),
        SignupOutcome::Incomplete(missing) => {
            let names: Vec<_> = missing.iter().map(|f| f.name()).collect();
            Err(AppError::BadRequest(format!(
                "required fields are empty: {}",
                names.join(", ")
            )))
        }
    }
}
