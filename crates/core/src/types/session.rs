//! Session identity record.
//!
//! The login flow stores one of these under the `user` key and an opaque
//! access token next to it. Only the fields the storefront displays are
//! modelled; anything else in the stored record is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar shown when the session has no profile picture.
pub const DEFAULT_AVATAR_URL: &str = "https://i.postimg.cc/s1zW5CcB/download-7.jpg";

/// The currently signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Display name shown in the user menu.
    pub name: String,
    /// Profile image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Account email, if the login flow provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the login flow created this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session with only a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_picture: None,
            email: None,
            logged_in_at: None,
        }
    }

    /// Profile picture, falling back to [`DEFAULT_AVATAR_URL`].
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        self.profile_picture
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
    }
}
