//! User-facing alert descriptions.
//!
//! Pages describe outcomes as [`Alert`] values and leave drawing them to the
//! host UI. An alert knows what confirming it should do, so the host only has
//! to follow [`Alert::on_confirm`].

use std::time::Duration;

use crate::routes::Route;

/// Icon category for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertIcon {
    Info,
    Success,
    Warning,
    Error,
}

/// What happens when the alert is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    /// A single button that only closes the alert.
    Dismiss { label: &'static str },
    /// A button that closes the alert and navigates.
    Navigate { label: &'static str, route: Route },
    /// No button; the alert closes itself.
    AutoClose { after: Duration },
}

/// A titled message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub text: Option<String>,
    pub icon: AlertIcon,
    pub confirm: Confirm,
}

impl Alert {
    fn new(icon: AlertIcon, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: None,
            icon,
            confirm: Confirm::Dismiss { label: "OK" },
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(AlertIcon::Info, title)
    }

    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(AlertIcon::Success, title)
    }

    #[must_use]
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(AlertIcon::Warning, title)
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(AlertIcon::Error, title)
    }

    /// Set the body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the confirm behaviour.
    #[must_use]
    pub const fn with_confirm(mut self, confirm: Confirm) -> Self {
        self.confirm = confirm;
        self
    }

    /// Route to follow once the user confirms, if any.
    #[must_use]
    pub const fn on_confirm(&self) -> Option<Route> {
        match self.confirm {
            Confirm::Navigate { route, .. } => Some(route),
            Confirm::Dismiss { .. } | Confirm::AutoClose { .. } => None,
        }
    }
}
