//! In-memory token store.
//!
//! Stand-in for the platform's encrypted key-value store. The shell wires
//! in its own secure-storage implementation of [`TokenStore`]; this one
//! backs tests and headless use.

use secrecy::Secret;
use std::sync::RwLock;

use crate::ports::TokenStore;

/// Process-local [`TokenStore`] holding at most one session token.
#[derive(Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<Secret<String>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<Secret<String>> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn put(&self, token: Secret<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    fn clear(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }
}
