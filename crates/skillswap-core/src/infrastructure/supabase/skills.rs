//! PostgREST-backed skill source

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use tracing::{debug, info};

use crate::domain::skills::{NewSkill, Skill, SkillSource};
use crate::error::{Error, Result};

use super::client::SupabaseClient;
use super::rows::{SkillInsert, SkillRow, TagsRow};

/// PostgREST answers a filter value the column type cannot parse (a
/// non-uuid id on a uuid key, SQLSTATE 22P02) with a 400
fn is_malformed_id(error: &Error) -> bool {
    matches!(
        error,
        Error::Backend { status: 400, message } if message.starts_with("invalid input syntax")
    )
}

/// Skill records stored in a Supabase table
#[derive(Debug, Clone)]
pub struct SupabaseSkillSource {
    client: SupabaseClient,
    table: String,
}

impl SupabaseSkillSource {
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    async fn fetch_rows(&self, query: &[(&str, &str)]) -> Result<Vec<Skill>> {
        let request = self.client.rest(Method::GET, &self.table)?.query(query);
        let rows: Vec<SkillRow> = self.client.send_json(request).await?;
        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_skill(now)).collect())
    }
}

#[async_trait]
impl SkillSource for SupabaseSkillSource {
    async fn fetch_approved(&self) -> Result<Vec<Skill>> {
        let skills = self
            .fetch_rows(&[("select", "*"), ("approved", "eq.true")])
            .await?;
        debug!(count = skills.len(), "Fetched approved skills");
        Ok(skills)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Skill>> {
        let filter = format!("eq.{}", id);
        let result = self
            .fetch_rows(&[("select", "*"), ("id", filter.as_str()), ("limit", "1")])
            .await;
        let mut skills = match result {
            Err(e) if is_malformed_id(&e) => {
                debug!(id = %id, "Skill id rejected by backend; treating as absent");
                return Ok(None);
            }
            other => other?,
        };
        Ok(if skills.is_empty() {
            None
        } else {
            Some(skills.swap_remove(0))
        })
    }

    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<Skill>> {
        let filter = format!("eq.{}", user_id);
        self.fetch_rows(&[
            ("select", "*"),
            ("user_id", filter.as_str()),
            ("approved", "eq.true"),
            ("order", "created_at.desc"),
        ])
        .await
    }

    async fn fetch_approved_tags(&self) -> Result<Vec<Vec<String>>> {
        let request = self
            .client
            .rest(Method::GET, &self.table)?
            .query(&[("select", "tags,approved"), ("approved", "eq.true")]);
        let rows: Vec<TagsRow> = self.client.send_json(request).await?;
        Ok(rows
            .into_iter()
            .filter(|row| row.approved.unwrap_or(false))
            .map(|row| row.tags.unwrap_or_default())
            .collect())
    }

    async fn create(&self, skill: &NewSkill) -> Result<Skill> {
        let request = self
            .client
            .rest(Method::POST, &self.table)?
            .header("Prefer", "return=representation")
            .json(&SkillInsert::from(skill));
        let rows: Vec<SkillRow> = self.client.send_json(request).await?;

        let created = rows
            .into_iter()
            .next()
            .map(|row| row.into_skill(Utc::now()))
            .ok_or_else(|| Error::InvalidResponse("insert returned no rows".to_string()))?;
        info!(skill_id = %created.id, "Inserted skill row");
        Ok(created)
    }
}
