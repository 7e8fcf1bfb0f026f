//! REST adapter for the authentication endpoints.
//!
//! `login` persists the returned access token into the injected
//! [`TokenStore`]; `logout` clears it unconditionally and never touches
//! the network (the backend keeps no server-side session).

use async_trait::async_trait;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, OpErrors};
use crate::domain::{ApiError, User, UserRole};
use crate::ports::{AuthGateway, RegisterRequest, TokenStore};

const LOGIN: OpErrors =
    OpErrors::with_overrides("Could not sign in", &[(401, "Invalid credentials")]);
const REGISTER: OpErrors = OpErrors::new("Could not create the account");
const ME: OpErrors = OpErrors::new("Could not load the session");

/// Production implementation of [`AuthGateway`].
pub struct RestAuthGateway {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl RestAuthGateway {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = ensure_success(self.api.post("/auth/login", &body).await?, &LOGIN)?;
        let payload: LoginResponseDto = response.json()?;

        if let Some(token) = payload.access_token.filter(|t| !t.is_empty()) {
            self.tokens.put(Secret::new(token));
        }

        Ok(payload.user.unwrap_or_default().into_domain())
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        let body = RegisterRequestDto {
            email: request.email,
            password: request.password,
            name: request.name,
        };
        let response = ensure_success(self.api.post("/auth/register", &body).await?, &REGISTER)?;
        let payload: UserEnvelope = response.json()?;
        Ok(payload.user.into_domain())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear();
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let response = ensure_success(self.api.get("/auth/me").await?, &ME)?;
        let payload: UserEnvelope = response.json()?;
        Ok(payload.user.into_domain())
    }
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct LoginRequestDto {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct RegisterRequestDto {
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponseDto {
    access_token: Option<String>,
    user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserDto,
}

#[derive(Debug, Default, Deserialize)]
struct UserDto {
    id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
}

impl UserDto {
    fn into_domain(self) -> User {
        User {
            id: self.id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            role: self.role.as_deref().map(UserRole::parse).unwrap_or_default(),
        }
    }
}
