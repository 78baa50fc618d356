//! Signup page.
//!
//! A four-field form. Every field is required; nothing else is validated
//! client-side. Submitting posts once to the signup API.

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::presentation::{Alert, Confirm};
use crate::routes::{Navigation, Route};
use crate::signup::{SignupClient, SignupError, SignupRequest};

/// How long the success alert stays up before closing itself.
const SUCCESS_ALERT_DURATION: Duration = Duration::from_millis(1500);

/// A signup form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Phone,
    Password,
}

impl SignupField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Password];

    /// Input name attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
        }
    }

    /// Placeholder text.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter Name",
            Self::Email => "Enter Email",
            Self::Phone => "Enter Phone Number",
            Self::Password => "Enter Password",
        }
    }
}

impl FromStr for SignupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown signup field `{s}`"))
    }
}

/// Result of [`SignupPage::submit`].
#[derive(Debug)]
pub enum SignupOutcome {
    /// Required fields are empty; nothing was sent.
    Incomplete(Vec<SignupField>),
    /// The account was created.
    Created,
    /// The API rejected the signup or could not be reached.
    Failed(SignupError),
}

impl SignupOutcome {
    /// Alert to show, if any. Incomplete forms are flagged inline instead.
    #[must_use]
    pub fn alert(&self) -> Option<Alert> {
        match self {
            Self::Incomplete(_) => None,
            Self::Created => Some(
                Alert::success("Signup successful! Please Login Your New Account").with_confirm(
                    Confirm::AutoClose {
                        after: SUCCESS_ALERT_DURATION,
                    },
                ),
            ),
            Self::Failed(_) => Some(
                Alert::error("Signup failed!").with_text("Try again. Email already exists."),
            ),
        }
    }

    /// Where to go next. Only a created account navigates (to login).
    #[must_use]
    pub const fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::Created => Some(Navigation::To(Route::Login)),
            Self::Incomplete(_) | Self::Failed(_) => None,
        }
    }
}

/// Signup form state.
#[derive(Debug)]
pub struct SignupPage {
    client: SignupClient,
    form: SignupRequest,
}

impl SignupPage {
    /// Empty form posting through `client`.
    #[must_use]
    pub fn new(client: SignupClient) -> Self {
        Self {
            client,
            form: SignupRequest {
                name: String::new(),
                email: String::new(),
                phone: String::new(),
                password: SecretString::from(String::new()),
            },
        }
    }

    /// Update one input.
    pub fn set_field(&mut self, field: SignupField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SignupField::Name => self.form.name = value,
            SignupField::Email => self.form.email = value,
            SignupField::Phone => self.form.phone = value,
            SignupField::Password => self.form.password = SecretString::from(value),
        }
    }

    /// Current value of a non-secret input. The password is never read back.
    #[must_use]
    pub fn value(&self, field: SignupField) -> Option<&str> {
        match field {
            SignupField::Name => Some(&self.form.name),
            SignupField::Email => Some(&self.form.email),
            SignupField::Phone => Some(&self.form.phone),
            SignupField::Password => None,
        }
    }

    /// Required inputs that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<SignupField> {
        SignupField::ALL
            .into_iter()
            .filter(|field| match field {
                SignupField::Password => self.form.password.expose_secret().is_empty(),
                other => self.value(*other).is_none_or(str::is_empty),
            })
            .collect()
    }

    /// Submit the form.
    ///
    /// Sends nothing while required fields are empty. Otherwise makes exactly
    /// one request and reports its result.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SignupOutcome {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return SignupOutcome::Incomplete(missing);
        }

        match self.client.submit(&self.form).await {
            Ok(()) => SignupOutcome::Created,
            Err(e) => {
                tracing::warn!(error = %e, "Signup failed");
                SignupOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::presentation::AlertIcon;

    fn page() -> SignupPage {
        let client = SignupClient::new(Url::parse("http://127.0.0.1:9/api/signup").unwrap()).unwrap();
        SignupPage::new(client)
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("phone".parse::<SignupField>().unwrap(), SignupField::Phone);
        assert!("address".parse::<SignupField>().is_err());
    }

    #[test]
    fn test_missing_fields() {
        let mut page = page();
        assert_eq!(page.missing_fields(), SignupField::ALL);

        page.set_field(SignupField::Name, "Nimal");
        page.set_field(SignupField::Password, "hunter22");
        assert_eq!(
            page.missing_fields(),
            [SignupField::Email, SignupField::Phone]
        );
        assert_eq!(page.value(SignupField::Name), Some("Nimal"));
        assert_eq!(page.value(SignupField::Password), None);
    }

    #[tokio::test]
    async fn test_incomplete_form_is_not_sent() {
        let outcome = page().submit().await;
        assert!(matches!(outcome, SignupOutcome::Incomplete(ref f) if f.len() == 4));
        assert!(outcome.alert().is_none());
        assert!(outcome.navigation().is_none());
    }

    #[test]
    fn test_outcome_presentation() {
        let created = SignupOutcome::Created;
        let alert = created.alert().unwrap();
        assert_eq!(alert.icon, AlertIcon::Success);
        assert!(matches!(alert.confirm, Confirm::AutoClose { after } if after == SUCCESS_ALERT_DURATION));
        assert_eq!(created.navigation(), Some(Navigation::To(Route::Login)));

        let failed = SignupOutcome::Failed(SignupError::Rejected { status: 409 });
        let alert = failed.alert().unwrap();
        assert_eq!(alert.icon, AlertIcon::Error);
        assert_eq!(alert.title, "Signup failed!");
        assert!(failed.navigation().is_none());
    }
}
