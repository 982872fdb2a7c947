//! Supabase HTTP client
//!
//! Thin async wrapper over the PostgREST (`/rest/v1`) and GoTrue
//! (`/auth/v1`) endpoints of a Supabase project. Every request is sent
//! once; there is no retry.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{BackendCredentials, Config};
use crate::error::{Error, Result};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared Supabase client
///
/// Clones share the HTTP connection pool and the current access token.
#[derive(Clone)]
pub struct SupabaseClient {
    http_client: HttpClient,
    base_url: String,
    anon_key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.access_token().is_some())
            .finish()
    }
}

/// Builder for creating a SupabaseClient
#[derive(Default)]
pub struct SupabaseClientBuilder {
    base_url: Option<String>,
    anon_key: Option<String>,
    timeout_secs: Option<u64>,
}

impl SupabaseClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the anon (public) API key
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<SupabaseClient> {
        let base_url = self
            .base_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::ConfigError("Supabase URL is required".to_string()))?;
        let anon_key = self
            .anon_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::ConfigError("Supabase anon key is required".to_string()))?;

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(
                self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(Error::NetworkError)?;

        Ok(SupabaseClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            access_token: Arc::new(RwLock::new(None)),
        })
    }
}

impl SupabaseClient {
    pub fn builder() -> SupabaseClientBuilder {
        SupabaseClientBuilder::new()
    }

    /// Create a client from configuration and environment credentials
    pub fn from_config(config: &Config) -> Result<Self> {
        let BackendCredentials { url, anon_key } = config.backend.credentials()?;
        Self::builder()
            .base_url(url)
            .anon_key(anon_key)
            .timeout_secs(config.backend.timeout_secs)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Use this token as the bearer for subsequent requests
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().ok().and_then(|guard| guard.clone())
    }

    fn default_headers(&self, bearer: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.anon_key)?);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            header_value(&format!("Bearer {}", bearer))?,
        );
        Ok(headers)
    }

    /// Request against a PostgREST table
    pub fn rest(&self, method: Method, table: &str) -> Result<RequestBuilder> {
        let bearer = self.access_token().unwrap_or_else(|| self.anon_key.clone());
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!(method = %method, url = %url, "Supabase REST request");
        Ok(self
            .http_client
            .request(method, url)
            .headers(self.default_headers(&bearer)?))
    }

    /// Request against a GoTrue endpoint, optionally as a given user
    pub fn auth(&self, method: Method, path: &str, bearer: Option<&str>) -> Result<RequestBuilder> {
        let bearer = bearer.unwrap_or(&self.anon_key);
        let url = format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'));
        debug!(method = %method, url = %url, "Supabase auth request");
        Ok(self
            .http_client
            .request(method, url)
            .headers(self.default_headers(bearer)?))
    }

    /// Send and decode a JSON body, turning error statuses into typed errors
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(backend_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::InvalidResponse(format!("{} (status {})", e, status.as_u16()))
        })
    }

    /// Send and discard the body
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<StatusCode> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(backend_error(status, &body));
        }
        Ok(status)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::ConfigError("Credentials contain invalid header characters".to_string()))
}

/// Build an error from a failed response
///
/// PostgREST reports `{code, message, details, hint}`; GoTrue uses one of
/// `error_description`, `msg`, `message` or `error`. The first present
/// field becomes the message, falling back to the raw body.
pub fn backend_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    Error::Backend {
        status: status.as_u16(),
        message,
    }
}
