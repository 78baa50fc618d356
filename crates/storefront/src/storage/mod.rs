//! Key-value persistence layer.
//!
//! Every page reads and writes cart and session state through a
//! [`KeyValueStore`] handed to it at construction. There is no ambient
//! global store: swapping the backend (memory for tests, a JSON file for the
//! CLI) changes persistence for every page at once.
//!
//! # Keys
//!
//! - [`keys::CART`] - JSON array of product records
//! - [`keys::USER`] - JSON session record
//! - [`keys::TOKEN`] - opaque access token, always co-present with `user`

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Persisted keys.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "cart";

    /// Key for the serialized session identity.
    pub const USER: &str = "user";

    /// Key for the session access token.
    pub const TOKEN: &str = "token";

    /// Keys cleared together on sign-out.
    pub const SIGN_OUT: [&str; 3] = [USER, TOKEN, CART];
}

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-keyed, string-valued persistence.
///
/// Single-key operations are atomic: a failed `set` leaves the previous value
/// in place. Multi-key atomicity is only guaranteed by [`remove_all`] when
/// [`is_transactional`] returns `true`.
///
/// [`remove_all`]: KeyValueStore::remove_all
/// [`is_transactional`]: KeyValueStore::is_transactional
pub trait KeyValueStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove several keys.
    ///
    /// The default implementation removes keys one at a time. If it fails
    /// part-way, keys before the failing one are already gone and the rest
    /// are untouched. Backends that can do better override this and
    /// [`is_transactional`](KeyValueStore::is_transactional).
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Whether [`remove_all`](KeyValueStore::remove_all) is all-or-nothing.
    fn is_transactional(&self) -> bool {
        false
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        (**self).remove_all(keys)
    }

    fn is_transactional(&self) -> bool {
        (**self).is_transactional()
    }
}
