//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for callers driving the storefront
//! (the CLI, a host UI). Recoverable conditions such as a duplicate cart
//! entry or a signed-out user are outcomes, not errors, and never appear here.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::signup::SignupError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Signup request failed.
    #[error("Signup error: {0}")]
    Signup(#[from] SignupError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Report this error to Sentry and the log.
    ///
    /// Only storage and catalog failures are captured; the rest are expected
    /// user-facing failures.
    pub fn report(&self) {
        if matches!(self, Self::Storage(_) | Self::Catalog(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::warn!(error = %self, "Storefront operation failed");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after a session is established to associate errors with users.
pub fn set_sentry_user(username: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on sign-out to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 42".to_string());
        assert_eq!(err.to_string(), "Not found: product 42");

        let err = AppError::from(StorageError::Poisoned);
        assert_eq!(err.to_string(), "Storage error: storage lock poisoned");
    }

    #[test]
    fn test_report_without_sentry_client() {
        // No client bound: capture is a no-op and must not panic.
        AppError::from(StorageError::Poisoned).report();
        AppError::NotFound("x".to_string()).report();
        AppError::BadRequest("missing name".to_string()).report();
        add_breadcrumb("cart", "test", Some(&[("k", "v")]));
    }
}
