//! Remote signup API client.
//!
//! One `POST` per submission with the form as JSON. Only `201 Created` means
//! the account was created; every other status, other 2xx included, and every
//! transport error is the same failure to the caller. No retries.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors that can occur when submitting a signup.
#[derive(Debug, Error)]
pub enum SignupError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with anything but `201 Created`.
    #[error("signup rejected with status {status}")]
    Rejected { status: u16 },
}

/// Account details sent to the signup API.
///
/// Implements `Debug` manually to redact the password.
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Wire body. Borrowed so the password is only exposed for serialization.
#[derive(Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    password: &'a str,
}

impl<'a> From<&'a SignupRequest> for SignupBody<'a> {
    fn from(request: &'a SignupRequest) -> Self {
        Self {
            name: &request.name,
            email: &request.email,
            phone: &request.phone,
            password: request.password.expose_secret(),
        }
    }
}

/// Client for the signup endpoint.
#[derive(Debug, Clone)]
pub struct SignupClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SignupClient {
    /// Create a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(endpoint: Url) -> Result<Self, SignupError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint submissions are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a signup.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Rejected`] for any status other than
    /// `201 Created` and
    /// [`SignupError::Http`] if the request could not be completed.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn submit(&self, request: &SignupRequest) -> Result<(), SignupError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SignupBody::from(request))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Signup request failed"))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            tracing::error!(status = status.as_u16(), "Signup rejected");
            return Err(SignupError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(status = status.as_u16(), "Signup accepted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            name: "Nimal".to_string(),
            email: "nimal@example.com".to_string(),
            phone: "0771234567".to_string(),
            password: SecretString::from("hunter22"),
        }
    }

    #[test]
    fn test_body_shape() {
        let req = request();
        let value = serde_json::to_value(SignupBody::from(&req)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Nimal",
                "email": "nimal@example.com",
                "phone": "0771234567",
                "password": "hunter22",
            })
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", request());
        assert!(debug.contains("nimal@example.com"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter22"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = SignupClient::new(Url::parse("http://127.0.0.1:9/api/signup").unwrap()).unwrap();
        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, SignupError::Http(_)));
    }
}
