//! Health checks
//!
//! Diagnostics behind the `doctor` command.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::auth::SessionStore;
use crate::infrastructure::{FileSessionStore, SupabaseClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: Some(message.into()),
        }
    }
}

/// Ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub timestamp: String,
}

impl HealthReport {
    fn from_checks(checks: Vec<HealthCheck>) -> Self {
        let overall_status = checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Ok);
        Self {
            overall_status,
            checks,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Run all checks against a loaded configuration
pub async fn doctor(config: &Config) -> HealthReport {
    let mut checks = vec![check_config(config), check_credentials(config)];
    checks.push(check_backend(config).await);
    checks.push(check_session());
    HealthReport::from_checks(checks)
}

fn check_config(config: &Config) -> HealthCheck {
    match config.validate() {
        Ok(()) => {
            let location = Config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "defaults".to_string());
            HealthCheck::new("config", HealthStatus::Ok, location)
        }
        Err(e) => HealthCheck::new("config", HealthStatus::Error, e.to_string()),
    }
}

fn check_credentials(config: &Config) -> HealthCheck {
    match config.backend.credentials() {
        Ok(credentials) => HealthCheck::new("credentials", HealthStatus::Ok, credentials.url),
        Err(e) => HealthCheck::new("credentials", HealthStatus::Error, e.to_string()),
    }
}

async fn check_backend(config: &Config) -> HealthCheck {
    let client = match SupabaseClient::from_config(config) {
        Ok(client) => client,
        Err(_) => {
            return HealthCheck::new("backend", HealthStatus::Warning, "skipped: no credentials");
        }
    };

    let probe = async {
        let request = client
            .rest(Method::GET, &config.backend.skills_table)?
            .query(&[("select", "id"), ("limit", "1")]);
        client.send_json::<Vec<serde_json::Value>>(request).await
    };

    match probe.await {
        Ok(_) => HealthCheck::new(
            "backend",
            HealthStatus::Ok,
            format!("table '{}' reachable", config.backend.skills_table),
        ),
        Err(e) => HealthCheck::new("backend", HealthStatus::Error, e.to_string()),
    }
}

fn check_session() -> HealthCheck {
    let loaded = FileSessionStore::in_config_dir().and_then(|store| store.load());
    match loaded {
        Ok(Some(session)) if session.is_expired(chrono::Utc::now()) => {
            HealthCheck::new("session", HealthStatus::Warning, "stored session has expired")
        }
        Ok(Some(session)) => HealthCheck::new(
            "session",
            HealthStatus::Ok,
            format!("signed in as {}", session.user.email),
        ),
        Ok(None) => HealthCheck::new("session", HealthStatus::Ok, "signed out"),
        Err(e) => HealthCheck::new("session", HealthStatus::Warning, e.to_string()),
    }
}
