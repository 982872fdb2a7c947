//! User profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tags: Option<Vec<String>>,
}

impl UserProfile {
    /// Profile created alongside a new account
    pub fn new(
        uid: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.into(),
            full_name: full_name.into(),
            email: email.into(),
            created_at: now,
            last_login_at: Some(now),
            updated_at: None,
            bio: None,
            location: None,
            avatar_url: None,
            skill_tags: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(bio) = &update.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
        if let Some(skill_tags) = &update.skill_tags {
            self.skill_tags = Some(skill_tags.clone());
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Partial profile update; only present fields are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_tags: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.avatar_url.is_none()
            && self.skill_tags.is_none()
    }
}
