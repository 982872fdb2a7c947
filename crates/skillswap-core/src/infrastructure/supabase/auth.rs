//! GoTrue-backed auth provider

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::auth::{AuthProvider, AuthUser, Session};
use crate::error::{Error, Result};

use super::client::SupabaseClient;

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<UserRow> for AuthUser {
    fn from(row: UserRow) -> Self {
        let metadata = row.user_metadata.unwrap_or_default();
        AuthUser {
            id: row.id,
            email: row.email.unwrap_or_default(),
            full_name: metadata.display_name.or(metadata.full_name),
            avatar_url: metadata.avatar_url,
        }
    }
}

/// Sign-up answers with a bare user, or with a session wrapping the user
/// when email confirmation is disabled
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    WithSession { user: UserRow },
    User(UserRow),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserRow,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));
        Session {
            user: self.user.into(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// Provider-side rejections carry a message worth showing the user
fn rejected(error: Error) -> Error {
    match error {
        Error::Backend { status, message } if (400..500).contains(&status) => {
            Error::AuthFailed(message)
        }
        other => other,
    }
}

/// Supabase auth (GoTrue)
///
/// Signing in also makes the session's token the bearer for REST calls
/// made through the shared client.
#[derive(Debug, Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthUser> {
        let request = self.client.auth(Method::POST, "signup", None)?.json(&json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        }));
        let response: SignUpResponse = self.client.send_json(request).await.map_err(rejected)?;

        let user: AuthUser = match response {
            SignUpResponse::WithSession { user } | SignUpResponse::User(user) => user.into(),
        };
        info!(user_id = %user.id, "Registered account");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .client
            .auth(Method::POST, "token", None)?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response: TokenResponse = self.client.send_json(request).await.map_err(rejected)?;

        let session = response.into_session(Utc::now());
        self.client.set_access_token(Some(session.access_token.clone()));
        debug!(user_id = %session.user.id, "Session issued");
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let request = self
            .client
            .auth(Method::POST, "logout", Some(&session.access_token))?;
        let result = self.client.send_empty(request).await;
        self.client.set_access_token(None);
        result.map(|_| ()).map_err(rejected)
    }

    async fn current_user(&self, session: &Session) -> Result<Option<AuthUser>> {
        let request = self
            .client
            .auth(Method::GET, "user", Some(&session.access_token))?;
        match self.client.send_json::<UserRow>(request).await {
            Ok(row) => {
                self.client.set_access_token(Some(session.access_token.clone()));
                Ok(Some(row.into()))
            }
            Err(Error::Backend { status: 401 | 403, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
