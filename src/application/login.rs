//! Login screen state container.
//!
//! Owns one [`LoginUiState`] snapshot published through a `watch` channel.
//! Every transition replaces the snapshot wholesale; consumers never see a
//! partially-updated state. Local validation failures short-circuit before
//! the gateway is invoked.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::User;
use crate::ports::AuthGateway;

/// Immutable snapshot of the login screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginUiState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub is_logged_in: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

/// State container for the login screen.
pub struct LoginScreen {
    auth: Arc<dyn AuthGateway>,
    state: watch::Sender<LoginUiState>,
}

impl LoginScreen {
    pub fn new(auth: Arc<dyn AuthGateway>) -> Self {
        let (state, _) = watch::channel(LoginUiState::default());
        Self { auth, state }
    }

    /// Subscribes to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<LoginUiState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> LoginUiState {
        self.state.borrow().clone()
    }

    pub fn set_email(&self, email: &str) {
        self.state.send_modify(|s| {
            s.email = email.to_string();
            s.error = None;
        });
    }

    pub fn set_password(&self, password: &str) {
        self.state.send_modify(|s| {
            s.password = password.to_string();
            s.error = None;
        });
    }

    /// Validates the form locally, then attempts the login.
    pub async fn submit(&self) {
        let (email, password) = {
            let s = self.state.borrow();
            (s.email.clone(), s.password.clone())
        };

        if let Err(message) = validate(&email, &password) {
            self.state.send_modify(|s| s.error = Some(message));
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.auth.login(email.trim(), &password).await {
            Ok(user) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.is_logged_in = true;
                s.user = Some(user);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }

    /// Ends the session and resets the screen to its initial state.
    pub async fn sign_out(&self) {
        let _ = self.auth.logout().await;
        self.state.send_replace(LoginUiState::default());
    }
}

fn validate(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}
