//! Authentication port.

use async_trait::async_trait;

use crate::domain::{ApiError, User};

/// Port for the authentication endpoints.
///
/// `login` persists the returned token into the session store as a side
/// effect; `logout` clears it unconditionally.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session. On success the token is stored
    /// and the mapped user returned.
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// Create a new account.
    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError>;

    /// End the session. The stored token is cleared even if the backend
    /// call fails.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Fetch the user owning the current session token.
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
