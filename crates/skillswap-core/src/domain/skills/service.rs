//! Skill catalog service
//!
//! Orchestrates fetching, approval gating, filtering and submission.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::entity::{NewSkill, Skill};
use super::filter::SkillFilter;
use super::listing::SkillListing;
use super::repository_trait::SkillSource;
use super::tags::extract_tag_sets;
use super::validation::SkillValidator;
use crate::error::Result;

/// Service over a [`SkillSource`] enforcing the approved-only invariant
#[derive(Clone)]
pub struct SkillCatalog {
    source: Arc<dyn SkillSource>,
}

impl std::fmt::Debug for SkillCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillCatalog").finish_non_exhaustive()
    }
}

impl SkillCatalog {
    /// Create a new catalog over the given source
    pub fn new(source: Arc<dyn SkillSource>) -> Self {
        Self { source }
    }

    /// Every approved skill in source order
    pub async fn approved(&self) -> Result<Vec<Skill>> {
        let skills = self.source.fetch_approved().await.inspect_err(|e| {
            error!(error = %e, "Error fetching skills");
        })?;

        let total = skills.len();
        let approved: Vec<Skill> = skills.into_iter().filter(|s| s.approved).collect();
        if approved.len() != total {
            debug!(
                dropped = total - approved.len(),
                "Source returned unapproved skills; dropping them"
            );
        }
        Ok(approved)
    }

    /// Approved skills matching the criteria
    pub async fn list(&self, filter: &SkillFilter) -> Result<Vec<Skill>> {
        let approved = self.approved().await?;
        Ok(filter.apply(approved))
    }

    /// Distinct tags across approved skills, sorted
    pub async fn tags(&self) -> Result<Vec<String>> {
        let tag_sets = self.source.fetch_approved_tags().await.inspect_err(|e| {
            error!(error = %e, "Error fetching tags");
        })?;
        Ok(extract_tag_sets(tag_sets))
    }

    /// Run a tokened fetch into the listing
    ///
    /// Returns whether the result was applied; a newer fetch started in
    /// the meantime makes this one stale.
    pub async fn refresh(&self, listing: &tokio::sync::Mutex<SkillListing>) -> bool {
        let token = listing.lock().await.begin_fetch();
        let result = self.approved().await;
        listing.lock().await.complete(token, result)
    }

    /// A single approved skill
    ///
    /// Unapproved records are reported as absent.
    pub async fn get(&self, id: &str) -> Result<Option<Skill>> {
        let skill = self.source.fetch_by_id(id).await.inspect_err(|e| {
            error!(id = %id, error = %e, "Error fetching skill by ID");
        })?;
        Ok(skill.filter(|s| s.approved))
    }

    /// Approved skills posted by a user, newest first
    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Skill>> {
        let skills = self.source.fetch_by_user(user_id).await.inspect_err(|e| {
            error!(user_id = %user_id, error = %e, "Error fetching user skills");
        })?;
        Ok(skills.into_iter().filter(|s| s.approved).collect())
    }

    /// Validate and store a new, auto-approved skill
    pub async fn submit(&self, skill: NewSkill) -> Result<Skill> {
        SkillValidator::validate(&skill)?;

        let created = self.source.create(&skill).await?;
        info!(id = %created.id, title = %created.title, "Skill created");
        Ok(created)
    }
}
