//! Registration screen state container.

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::User;
use crate::ports::{AuthGateway, RegisterRequest};

/// Immutable snapshot of the registration screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterUiState {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub is_loading: bool,
    pub registered_user: Option<User>,
    pub error: Option<String>,
}

/// State container for the registration screen.
pub struct RegisterScreen {
    auth: Arc<dyn AuthGateway>,
    state: watch::Sender<RegisterUiState>,
}

impl RegisterScreen {
    pub fn new(auth: Arc<dyn AuthGateway>) -> Self {
        let (state, _) = watch::channel(RegisterUiState::default());
        Self { auth, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<RegisterUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RegisterUiState {
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

    pub fn set_confirm_password(&self, confirm: &str) {
        self.state.send_modify(|s| {
            s.confirm_password = confirm.to_string();
            s.error = None;
        });
    }

    pub fn set_name(&self, name: &str) {
        self.state.send_modify(|s| {
            s.name = name.to_string();
            s.error = None;
        });
    }

    /// Validates the form locally, then attempts the registration.
    pub async fn submit(&self) {
        let snapshot = self.state();

        if let Err(message) = validate(&snapshot) {
            self.state.send_modify(|s| s.error = Some(message));
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let mut request = RegisterRequest::new(snapshot.email.trim(), snapshot.password);
        if !snapshot.name.trim().is_empty() {
            request = request.with_name(snapshot.name.trim());
        }

        match self.auth.register(request).await {
            Ok(user) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.registered_user = Some(user);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }
}

fn validate(state: &RegisterUiState) -> Result<(), String> {
    if state.email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !state.email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    if state.password.is_empty() {
        return Err("Password is required".to_string());
    }
    if state.password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if state.password != state.confirm_password {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockAuthGateway;
    use crate::adapters::token::InMemoryTokenStore;
    use crate::domain::ApiError;

    fn screen() -> (RegisterScreen, Arc<MockAuthGateway>) {
        let tokens = Arc::new(InMemoryTokenStore::new());
        let auth = Arc::new(MockAuthGateway::new(tokens));
        (RegisterScreen::new(auth.clone()), auth)
    }

    fn fill_valid(screen: &RegisterScreen) {
        screen.set_email("new@b.com");
        screen.set_password("secret1");
        screen.set_confirm_password("secret1");
        screen.set_name("Ada");
    }

    #[tokio::test]
    async fn successful_registration_exposes_the_user() {
        let (screen, _) = screen();
        fill_valid(&screen);
        screen.submit().await;

        let state = screen.state();
        assert!(state.error.is_none());
        let user = state.registered_user.unwrap();
        assert_eq!(user.email, "new@b.com");
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn short_password_is_rejected_locally() {
        let (screen, _) = screen();
        fill_valid(&screen);
        screen.set_password("abc");
        screen.set_confirm_password("abc");
        screen.submit().await;

        assert_eq!(
            screen.state().error.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[tokio::test]
    async fn mismatched_passwords_are_rejected_locally() {
        let (screen, _) = screen();
        fill_valid(&screen);
        screen.set_confirm_password("different");
        screen.submit().await;

        assert_eq!(
            screen.state().error.as_deref(),
            Some("Passwords do not match")
        );
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_the_backend_message() {
        let (screen, _) = screen();
        fill_valid(&screen);
        screen.submit().await;
        screen.submit().await;

        assert_eq!(
            screen.state().error.as_deref(),
            Some("Email already registered")
        );
    }

    #[tokio::test]
    async fn network_failure_surfaces_the_message() {
        let (screen, auth) = screen();
        auth.failures.push(ApiError::network(""));
        fill_valid(&screen);
        screen.submit().await;

        assert_eq!(screen.state().error.as_deref(), Some("Connection error"));
    }
}
