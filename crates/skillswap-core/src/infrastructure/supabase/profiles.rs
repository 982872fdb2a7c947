//! PostgREST-backed profile store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use crate::domain::profiles::{ProfileStore, ProfileUpdate, UserProfile};
use crate::error::{Error, Result};

use super::client::SupabaseClient;
use super::rows::{ProfileInsert, ProfileRow};

#[derive(Debug, Clone)]
pub struct SupabaseProfileStore {
    client: SupabaseClient,
    table: String,
}

impl SupabaseProfileStore {
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        let filter = format!("eq.{}", uid);
        let request = self
            .client
            .rest(Method::GET, &self.table)?
            .query(&[("select", "*"), ("uid", filter.as_str()), ("limit", "1")]);
        let rows: Vec<ProfileRow> = self.client.send_json(request).await?;
        Ok(rows.into_iter().next().map(|row| row.into_profile(Utc::now())))
    }

    async fn create(&self, profile: &UserProfile) -> Result<()> {
        let request = self
            .client
            .rest(Method::POST, &self.table)?
            .json(&ProfileInsert::from(profile));
        self.client.send_empty(request).await?;
        debug!(uid = %profile.uid, "Inserted profile row");
        Ok(())
    }

    async fn update(&self, uid: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let filter = format!("eq.{}", uid);
        let mut body = serde_json::to_value(update)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));
        }

        let request = self
            .client
            .rest(Method::PATCH, &self.table)?
            .query(&[("uid", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&body);
        let rows: Vec<ProfileRow> = self.client.send_json(request).await?;
        rows.into_iter()
            .next()
            .map(|row| row.into_profile(Utc::now()))
            .ok_or_else(|| Error::ProfileNotFound(uid.to_string()))
    }

    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> Result<()> {
        let filter = format!("eq.{}", uid);
        let request = self
            .client
            .rest(Method::PATCH, &self.table)?
            .query(&[("uid", filter.as_str())])
            .json(&json!({ "last_login_at": at.to_rfc3339() }));
        self.client.send_empty(request).await?;
        Ok(())
    }
}
