//! Mock authentication gateway.

use async_trait::async_trait;
use secrecy::Secret;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, User, UserRole};
use crate::ports::{AuthGateway, RegisterRequest, TokenStore};

/// Fake [`AuthGateway`] with a fixed set of accounts.
///
/// Honors the port contract: a successful login stores the configured
/// token into the injected [`TokenStore`], logout clears it.
pub struct MockAuthGateway {
    accounts: Mutex<Vec<Account>>,
    tokens: Arc<dyn TokenStore>,
    issued_token: String,
    pub failures: FailureInjector,
    login_calls: Mutex<Vec<String>>,
}

struct Account {
    email: String,
    password: String,
    user: User,
}

impl MockAuthGateway {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            tokens,
            issued_token: "tok1".to_string(),
            failures: FailureInjector::default(),
            login_calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers a known account the mock will accept.
    pub fn with_account(self, email: &str, password: &str, user: User) -> Self {
        self.accounts.lock().unwrap().push(Account {
            email: email.to_string(),
            password: password.to_string(),
            user,
        });
        self
    }

    /// Sets the token issued on successful login (default "tok1").
    pub fn with_issued_token(mut self, token: &str) -> Self {
        self.issued_token = token.to_string();
        self
    }

    /// Emails passed to `login` so far.
    pub fn login_calls(&self) -> Vec<String> {
        self.login_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.login_calls.lock().unwrap().push(email.to_string());
        self.failures.take()?;

        let accounts = self.accounts.lock().unwrap();
        match accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
        {
            Some(account) => {
                self.tokens.put(Secret::new(self.issued_token.clone()));
                Ok(account.user.clone())
            }
            None => Err(ApiError::http(401, "Invalid credentials")),
        }
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        self.failures.take()?;

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == request.email) {
            return Err(ApiError::http(400, "Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: request.email.clone(),
            name: request.name.unwrap_or_default(),
            role: UserRole::User,
        };
        accounts.push(Account {
            email: request.email,
            password: request.password,
            user: user.clone(),
        });
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear();
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.failures.take()?;

        if self.tokens.get().is_none() {
            return Err(ApiError::http(401, "Session expired"));
        }
        let accounts = self.accounts.lock().unwrap();
        accounts
            .first()
            .map(|a| a.user.clone())
            .ok_or_else(|| ApiError::http(404, "Not found"))
    }
}
