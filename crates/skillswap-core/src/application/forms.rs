//! Raw form input
//!
//! Converts free-text form fields into domain submissions.

use serde::Deserialize;

use crate::domain::auth::AuthUser;
use crate::domain::skills::{DEFAULT_EXCHANGE_TYPE, DEFAULT_LEVEL, NewSkill};

/// The skill upload form as typed by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    /// Comma-separated
    pub tags: String,
    pub level: String,
    pub exchange_type: String,
    pub image_url: String,
}

/// Split comma-separated tags, trimming and dropping empties
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

impl SkillForm {
    /// Build the submission for the signed-in author
    pub fn into_new_skill(self, author: &AuthUser) -> NewSkill {
        let or_default = |value: &str, default: &str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        let image_url = self.image_url.trim();

        NewSkill {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            location: self.location.trim().to_string(),
            tags: parse_tags(&self.tags),
            level: Some(or_default(&self.level, DEFAULT_LEVEL)),
            exchange_type: Some(or_default(&self.exchange_type, DEFAULT_EXCHANGE_TYPE)),
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            user_id: author.id.clone(),
            user_name: author.display_name(),
            user_avatar: author.avatar_url.clone(),
        }
    }
}
