//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BEEZ_SIGNUP_URL` - Signup endpoint (default: `http://localhost:5000/api/signup`)
//! - `BEEZ_STORAGE_PATH` - JSON file backing cart and session storage
//!   (default: `.beez/storage.json`)
//! - `BEEZ_AUTH_POLICY` - `marker` (any stored user counts as signed in) or
//!   `session` (the stored user must parse) (default: `marker`)
//! - `BEEZ_CART_DEDUP_KEY` - `name` or `id` (default: `name`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::cart::DedupKey;
use crate::session::AuthPolicy;

const DEFAULT_SIGNUP_URL: &str = "http://localhost:5000/api/signup";
const DEFAULT_STORAGE_PATH: &str = ".beez/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Signup API endpoint
    pub signup_url: Url,
    /// File backing the key-value store
    pub storage_path: PathBuf,
    /// Rule deciding whether a user is signed in
    pub auth_policy: AuthPolicy,
    /// Attribute used to deduplicate cart entries
    pub dedup_key: DedupKey,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            signup_url: default_signup_url(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            auth_policy: AuthPolicy::default(),
            dedup_key: DedupKey::default(),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let signup_url = match lookup("BEEZ_SIGNUP_URL") {
            Some(raw) => parse_signup_url(&raw)?,
            None => default_signup_url(),
        };
        let storage_path = lookup("BEEZ_STORAGE_PATH")
            .filter(|p| !p.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let auth_policy = parse_optional(&lookup, "BEEZ_AUTH_POLICY")?.unwrap_or_default();
        let dedup_key = parse_optional(&lookup, "BEEZ_CART_DEDUP_KEY")?.unwrap_or_default();
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());

        Ok(Self {
            signup_url,
            storage_path,
            auth_policy,
            dedup_key,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_signup_url() -> Url {
    Url::parse(DEFAULT_SIGNUP_URL).expect("default signup URL is valid")
}

/// Parse the signup endpoint, accepting only http(s) URLs.
fn parse_signup_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("BEEZ_SIGNUP_URL".to_string(), msg);
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

/// Parse an optional variable with `FromStr`.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    lookup(key)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.signup_url.as_str(), DEFAULT_SIGNUP_URL);
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.auth_policy, AuthPolicy::MarkerPresent);
        assert_eq!(config.dedup_key, DedupKey::Name);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BEEZ_SIGNUP_URL", "https://api.beez.lk/api/signup"),
            ("BEEZ_STORAGE_PATH", "/tmp/beez.json"),
            ("BEEZ_AUTH_POLICY", "session"),
            ("BEEZ_CART_DEDUP_KEY", "id"),
            ("SENTRY_DSN", "https://key@o0.ingest.sentry.io/1"),
        ])
        .unwrap();
        assert_eq!(config.signup_url.host_str(), Some("api.beez.lk"));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/beez.json"));
        assert_eq!(config.auth_policy, AuthPolicy::ParsedSession);
        assert_eq!(config.dedup_key, DedupKey::Id);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_signup_url() {
        let err = config_from(&[("BEEZ_SIGNUP_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BEEZ_SIGNUP_URL"));

        assert!(config_from(&[("BEEZ_SIGNUP_URL", "ftp://beez.lk/signup")]).is_err());
    }

    #[test]
    fn test_invalid_policy_and_key() {
        assert!(config_from(&[("BEEZ_AUTH_POLICY", "cookie")]).is_err());
        assert!(config_from(&[("BEEZ_CART_DEDUP_KEY", "sku")]).is_err());
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = config_from(&[("BEEZ_AUTH_POLICY", ""), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.auth_policy, AuthPolicy::MarkerPresent);
        assert!(config.sentry_dsn.is_none());
    }
}
