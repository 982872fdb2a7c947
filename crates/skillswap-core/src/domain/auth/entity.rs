//! Authentication types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in identity as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl AuthUser {
    /// Name to attach to posted skills
    ///
    /// Falls back to the email local part, then "Anonymous".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "Anonymous".to_string(),
        }
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Sign-up form input
#[derive(Debug, Clone)]
pub struct SignUp {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Repeated password; checked when present
    pub confirm_password: Option<String>,
}

/// Login form input
#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(full_name: Option<&str>, email: &str) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(user(Some("Ama"), "a@x.io").display_name(), "Ama");
        assert_eq!(user(Some("  "), "kofi@x.io").display_name(), "kofi");
        assert_eq!(user(None, "@x.io").display_name(), "Anonymous");
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            user: user(None, "a@x.io"),
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: Some(now - Duration::seconds(1)),
        };
        assert!(session.is_expired(now));

        let open = Session {
            expires_at: None,
            ..session
        };
        assert!(!open.is_expired(now));
    }
}
