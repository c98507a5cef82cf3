//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::ROLE_USER;
use crate::error::DomainResult;

/// A user account.
///
/// Only credential storage is modelled: `password_hash` is written to the
/// store but never serialized to a caller-facing representation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1, message = "password hash is required"))]
    pub password_hash: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Free-form role label
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

// Keep the hash out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .field("role", &self.role)
            .finish()
    }
}

impl User {
    /// Create an account with the default role.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
            created_at: Utc::now(),
            last_login: None,
            role: ROLE_USER.to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Check the field rules that must hold before the account is written.
    pub fn check(&self) -> DomainResult<()> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_role() {
        let user = User::new("testuser", "hashedpassword", "test@example.com");
        assert_eq!(user.role, ROLE_USER);
        assert!(user.id.is_none());
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("testuser", "hashedpassword", "test@example.com");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hashedpassword"));
        assert!(json.contains("\"username\":\"testuser\""));
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User::new("testuser", "hashedpassword", "test@example.com");
        let debug = format!("{:?}", user);

        assert!(!debug.contains("hashedpassword"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_invalid_email_fails_check() {
        let user = User::new("testuser", "hashedpassword", "not-an-email");
        assert!(user.check().is_err());
    }

    #[test]
    fn test_empty_role_fails_check() {
        let user = User::new("testuser", "hashedpassword", "test@example.com").with_role("");
        assert!(user.check().is_err());
    }
}
