//! Session token store port.

use secrecy::Secret;

/// Port for the platform secret store holding the session token.
///
/// The transport layer reads this synchronously on every outgoing request;
/// `login` writes it and `logout` clears it. Injecting the store makes the
/// token lifecycle testable without a real secure-storage backend.
pub trait TokenStore: Send + Sync {
    /// Returns the current session token, if any.
    fn get(&self) -> Option<Secret<String>>;

    /// Replaces the stored token.
    fn put(&self, token: Secret<String>);

    /// Removes the stored token.
    fn clear(&self);
}
