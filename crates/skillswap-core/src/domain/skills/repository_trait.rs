//! Repository trait for skill records
//!
//! Abstracts over the record store (Supabase, in-memory, etc.).

use async_trait::async_trait;

use crate::error::Result;

use super::entity::{NewSkill, Skill};

/// Source of skill records
///
/// Every call is attempt-once; transport failures are returned to the
/// caller as typed errors.
#[async_trait]
pub trait SkillSource: Send + Sync {
    /// Fetch every approved skill
    async fn fetch_approved(&self) -> Result<Vec<Skill>>;

    /// Fetch a single skill, `None` when no record has this id
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Skill>>;

    /// Fetch the approved skills posted by a user, newest first
    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<Skill>>;

    /// Fetch only the tag column of every approved skill
    async fn fetch_approved_tags(&self) -> Result<Vec<Vec<String>>> {
        Ok(self
            .fetch_approved()
            .await?
            .into_iter()
            .filter(|skill| skill.approved)
            .map(|skill| skill.tags)
            .collect())
    }

    /// Insert a new skill; the stored record is always approved
    async fn create(&self, skill: &NewSkill) -> Result<Skill>;
}
