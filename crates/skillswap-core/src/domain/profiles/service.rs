//! Profile service

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::entity::{ProfileUpdate, UserProfile};
use super::repository_trait::ProfileStore;
use super::validation::ProfileValidator;
use crate::domain::skills::{Skill, SkillCatalog};
use crate::error::{Error, Result};

/// A profile together with the skills its owner posted
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub profile: UserProfile,
    pub skills: Vec<Skill>,
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    catalog: SkillCatalog,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>, catalog: SkillCatalog) -> Self {
        Self { store, catalog }
    }

    /// Get a profile; a missing row is a typed not-found error
    pub async fn get(&self, uid: &str) -> Result<UserProfile> {
        self.store
            .get(uid)
            .await?
            .ok_or_else(|| Error::ProfileNotFound(uid.to_string()))
    }

    /// Profile plus posted skills, fetched concurrently
    pub async fn overview(&self, uid: &str) -> Result<ProfileOverview> {
        let (profile, skills) = tokio::join!(self.get(uid), self.catalog.by_user(uid));
        Ok(ProfileOverview {
            profile: profile?,
            skills: skills?,
        })
    }

    /// Validate and apply a partial update
    pub async fn update(&self, uid: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        ProfileValidator::validate_update(update)?;

        let profile = self.store.update(uid, update).await?;
        info!(uid = %uid, "Profile updated");
        Ok(profile)
    }
}
