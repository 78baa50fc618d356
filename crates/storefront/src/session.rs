//! Authentication gate and sign-out.
//!
//! A session is the pair of [`keys::USER`] (identity record) and
//! [`keys::TOKEN`] (opaque access token). Both are written by the login flow
//! and cleared together on sign-out, along with the cart.
//!
//! Whether a user counts as signed in is decided in one place,
//! [`SessionGate::is_authenticated`], under an explicit [`AuthPolicy`]. Every
//! gated action goes through [`SessionGate::guard_mutation`].

use std::str::FromStr;

use beez_core::Session;
use secrecy::SecretString;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::presentation::{Alert, Confirm};
use crate::routes::Route;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Rule deciding whether a user is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Any stored `user` value counts, parseable or not.
    #[default]
    MarkerPresent,
    /// Only a `user` value that parses as a [`Session`] counts.
    ParsedSession,
}

impl FromStr for AuthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marker" => Ok(Self::MarkerPresent),
            "session" => Ok(Self::ParsedSession),
            other => Err(format!("expected `marker` or `session`, got `{other}`")),
        }
    }
}

/// Prompt offered when a gated action is attempted while signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPrompt {
    redirect: Route,
}

impl LoginPrompt {
    /// Alert asking the user to log in; confirming it leads to the login page.
    #[must_use]
    pub fn alert(&self) -> Alert {
        Alert::warning("Not Logged In")
            .with_text("Please log in to add items to your cart.")
            .with_confirm(Confirm::Navigate {
                label: "Login",
                route: self.redirect,
            })
    }

    /// The user accepted the prompt: where to navigate.
    #[must_use]
    pub const fn accept(self) -> Route {
        self.redirect
    }
}

/// Outcome of [`SessionGate::guard_mutation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    /// The user is signed in and the action ran.
    Allowed(T),
    /// The user is signed out; the action did not run.
    Unauthenticated(LoginPrompt),
}

/// Implemented by anything holding an in-memory copy of cart or session.
pub trait Invalidate {
    /// Drop every cached copy of cart and session state.
    fn invalidate(&mut self);
}

/// Signal that all in-memory cart/session copies are now stale.
///
/// Returned by [`SessionGate::sign_out`]. Callers must hand it to every live
/// view via [`ViewInvalidation::apply`].
#[must_use = "views keep showing the signed-out user's cart until invalidated"]
#[derive(Debug, PartialEq, Eq)]
pub struct ViewInvalidation {
    _private: (),
}

impl ViewInvalidation {
    /// Reset `view`. Returns the signal so it can be applied to more views.
    pub fn apply(self, view: &mut impl Invalidate) -> Self {
        view.invalidate();
        self
    }

    /// Reset every view in `views`.
    pub fn apply_all<'a, V: Invalidate + 'a>(self, views: impl IntoIterator<Item = &'a mut V>) {
        for view in views {
            view.invalidate();
        }
    }
}

/// Result of a successful sign-out.
#[derive(Debug, PartialEq, Eq)]
pub struct SignedOut {
    /// Must be applied to all live views.
    pub invalidation: ViewInvalidation,
}

impl SignedOut {
    /// Alert confirming the sign-out; confirming it returns to the home page.
    #[must_use]
    pub fn alert(&self) -> Alert {
        Alert::success("Logged Out")
            .with_text("You have been successfully logged out.")
            .with_confirm(Confirm::Navigate {
                label: "OK",
                route: Route::Home,
            })
    }
}

/// Reads the persisted session and gates mutations on it.
#[derive(Debug, Clone)]
pub struct SessionGate<S> {
    store: S,
    policy: AuthPolicy,
}

impl<S: KeyValueStore> SessionGate<S> {
    /// Create a gate using [`AuthPolicy::MarkerPresent`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: AuthPolicy::default(),
        }
    }

    /// Use `policy` for every authentication decision.
    #[must_use]
    pub const fn with_policy(mut self, policy: AuthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> AuthPolicy {
        self.policy
    }

    fn raw_user(&self) -> Option<String> {
        self.store
            .get(keys::USER)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to read session"))
            .ok()
            .flatten()
    }

    /// The persisted session, or `None` if absent or unparseable.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        let raw = self.raw_user()?;
        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed persisted session, treating as signed out");
                None
            }
        }
    }

    /// The persisted access token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.store
            .get(keys::TOKEN)
            .ok()
            .flatten()
            .map(SecretString::from)
    }

    /// Whether a user is signed in under the active [`AuthPolicy`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.policy {
            AuthPolicy::MarkerPresent => self.raw_user().is_some(),
            AuthPolicy::ParsedSession => self.current_session().is_some(),
        }
    }

    /// Run `action` only if a user is signed in.
    ///
    /// When signed out the action is never invoked and a [`LoginPrompt`]
    /// pointing at the login route is returned instead.
    pub fn guard_mutation<T>(&self, action: impl FnOnce() -> T) -> Gated<T> {
        if self.is_authenticated() {
            Gated::Allowed(action())
        } else {
            tracing::info!("Rejected gated action: not logged in");
            Gated::Unauthenticated(LoginPrompt {
                redirect: Route::Login,
            })
        }
    }

    /// Store a new session, as the login flow does.
    ///
    /// The token is written first so a failure between the two writes never
    /// leaves a `user` marker without its token.
    ///
    /// # Errors
    ///
    /// Returns an error if either value could not be persisted.
    #[instrument(skip(self, session, token), fields(user = %session.name))]
    pub fn establish(&self, session: &Session, token: &str) -> Result<(), StorageError> {
        let record = serde_json::to_string(session)?;
        self.store.set(keys::TOKEN, token)?;
        if let Err(e) = self.store.set(keys::USER, &record) {
            let _ = self.store.remove(keys::TOKEN).inspect_err(|rollback| {
                tracing::error!(
                    error = %rollback,
                    "Failed to roll back token after session write failed, token left behind"
                );
            });
            return Err(e);
        }
        set_sentry_user(&session.name, session.email.as_deref());
        tracing::info!("Session established");
        Ok(())
    }

    /// Clear session, token and cart.
    ///
    /// The three keys are removed in one [`KeyValueStore::remove_all`]. On a
    /// non-transactional backend a failure can leave some keys behind; the
    /// error is returned and no invalidation is issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be written.
    #[instrument(skip(self))]
    pub fn sign_out(&self) -> Result<SignedOut, StorageError> {
        if !self.store.is_transactional() {
            tracing::debug!("Signing out on a non-transactional store");
        }

        self.store.remove_all(&keys::SIGN_OUT).inspect_err(|e| {
            tracing::error!(error = %e, "Sign-out failed, session may be partially cleared");
        })?;

        clear_sentry_user();
        tracing::info!("Signed out");
        Ok(SignedOut {
            invalidation: ViewInvalidation { _private: () },
        })
    }

    /// Sign-in intent: the route hosting the login flow.
    #[must_use]
    pub const fn sign_in(&self) -> Route {
        Route::Login
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;
    use crate::cart::CartStore;
    use crate::storage::MemoryStore;

    fn signed_in_store() -> MemoryStore {
        let store = MemoryStore::new();
        SessionGate::new(store.clone())
            .establish(&Session::new("Nimal"), "tok-123")
            .unwrap();
        store
    }

    #[test]
    fn test_anonymous_by_default() {
        let gate = SessionGate::new(MemoryStore::new());
        assert!(!gate.is_authenticated());
        assert!(gate.current_session().is_none());
        assert!(gate.token().is_none());
    }

    #[test]
    fn test_establish_sets_user_and_token() {
        let gate = SessionGate::new(signed_in_store());
        assert!(gate.is_authenticated());
        assert_eq!(gate.current_session().unwrap().name, "Nimal");
        assert!(gate.token().is_some());
    }

    /// Rejects writes of the `user` key and, optionally, every removal.
    struct UserWriteFails {
        inner: MemoryStore,
        fail_removes: bool,
    }

    impl KeyValueStore for UserWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == keys::USER {
                return Err(StorageError::Io(std::io::Error::other("quota exceeded")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_removes {
                return Err(StorageError::Poisoned);
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_establish_rolls_back_token() {
        let inner = MemoryStore::new();
        let gate = SessionGate::new(UserWriteFails {
            inner: inner.clone(),
            fail_removes: false,
        });

        let err = gate.establish(&Session::new("Nimal"), "tok-1").unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(inner.get(keys::TOKEN).unwrap(), None);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_establish_reports_write_error_when_rollback_fails() {
        let inner = MemoryStore::new();
        let gate = SessionGate::new(UserWriteFails {
            inner: inner.clone(),
            fail_removes: true,
        });

        let err = gate.establish(&Session::new("Nimal"), "tok-1").unwrap_err();

        // The original write failure wins over the rollback failure.
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(inner.get(keys::TOKEN).unwrap().as_deref(), Some("tok-1"));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_marker_policy_accepts_unparseable_user() {
        let store = MemoryStore::with_entries([(keys::USER, "garbage")]);
        let gate = SessionGate::new(store);
        assert!(gate.current_session().is_none());
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_session_policy_requires_parse() {
        let store = MemoryStore::with_entries([(keys::USER, "garbage")]);
        let gate = SessionGate::new(store.clone()).with_policy(AuthPolicy::ParsedSession);
        assert!(!gate.is_authenticated());

        store.set(keys::USER, r#"{"name":"Nimal"}"#).unwrap();
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_guard_runs_action_when_signed_in() {
        let gate = SessionGate::new(signed_in_store());
        assert_eq!(gate.guard_mutation(|| 7), Gated::Allowed(7));
    }

    #[test]
    fn test_guard_rejects_when_signed_out() {
        let gate = SessionGate::new(MemoryStore::new());
        let ran = Cell::new(false);

        let outcome = gate.guard_mutation(|| ran.set(true));

        assert!(!ran.get());
        let Gated::Unauthenticated(prompt) = outcome else {
            panic!("expected Unauthenticated");
        };
        assert_eq!(prompt.alert().on_confirm(), Some(Route::Login));
        assert_eq!(prompt.accept(), Route::Login);
    }

    #[test]
    fn test_sign_out_clears_session_token_and_cart() {
        let store = signed_in_store();
        store.set(keys::CART, r#"[{"id":1,"name":"Mug","price":12}]"#).unwrap();
        let gate = SessionGate::new(store.clone());
        let carts = CartStore::new(store.clone());
        assert_eq!(carts.hydrate().len(), 1);

        let signed_out = gate.sign_out().unwrap();

        assert_eq!(signed_out.alert().on_confirm(), Some(Route::Home));
        assert!(carts.hydrate().is_empty());
        assert!(gate.current_session().is_none());
        assert!(gate.token().is_none());
        assert!(!gate.is_authenticated());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_sign_out_is_repeatable() {
        let gate = SessionGate::new(MemoryStore::new());
        assert!(gate.sign_out().is_ok());
        assert!(gate.sign_out().is_ok());
    }

    #[derive(Default)]
    struct CachedView {
        cart_len: usize,
        user: Option<String>,
    }

    impl Invalidate for CachedView {
        fn invalidate(&mut self) {
            self.cart_len = 0;
            self.user = None;
        }
    }

    #[test]
    fn test_invalidation_resets_views() {
        let gate = SessionGate::new(signed_in_store());
        let mut a = CachedView {
            cart_len: 2,
            user: Some("Nimal".into()),
        };
        let mut views = vec![CachedView {
            cart_len: 1,
            user: None,
        }];

        let signed_out = gate.sign_out().unwrap();
        signed_out.invalidation.apply(&mut a).apply_all(&mut views);

        assert_eq!(a.cart_len, 0);
        assert!(a.user.is_none());
        assert_eq!(views.first().unwrap().cart_len, 0);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("marker".parse::<AuthPolicy>().unwrap(), AuthPolicy::MarkerPresent);
        assert_eq!("SESSION".parse::<AuthPolicy>().unwrap(), AuthPolicy::ParsedSession);
        assert!("cookie".parse::<AuthPolicy>().is_err());
    }

    proptest! {
        #[test]
        fn prop_guard_never_runs_without_marker(
            cart in prop::option::of("[ -~]{0,40}"),
            token in prop::option::of("[a-z0-9]{1,16}"),
        ) {
            let store = MemoryStore::new();
            if let Some(cart) = &cart {
                store.set(keys::CART, cart).unwrap();
            }
            if let Some(token) = &token {
                store.set(keys::TOKEN, token).unwrap();
            }
            let gate = SessionGate::new(store);
            let ran = Cell::new(false);

            let outcome = gate.guard_mutation(|| ran.set(true));

            prop_assert!(!ran.get());
            prop_assert!(matches!(outcome, Gated::Unauthenticated(_)));
        }
    }
}
