//! User entity.

use serde::{Deserialize, Serialize};

/// An authenticated CareMyCar user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Role assigned by the backend; drives which screens a shell exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Mechanic,
    Admin,
}

impl UserRole {
    /// Parses a wire role string, defaulting to `User` for unknown values.
    pub fn parse(value: &str) -> Self {
        match value {
            "mechanic" => UserRole::Mechanic,
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}
