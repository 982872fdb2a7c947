//! Skill entity and submission types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Level applied when a submission leaves it blank
pub const DEFAULT_LEVEL: &str = "Beginner";

/// Exchange type applied when a submission leaves it blank
pub const DEFAULT_EXCHANGE_TYPE: &str = "Free";

/// Title shown when the store has none
pub const UNTITLED: &str = "Untitled";

/// A single listed offering of knowledge or service by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Display order is insertion order; matching ignores order
    pub tags: Vec<String>,
    pub location: String,
    pub level: String,
    pub exchange_type: String,
    pub image_url: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub approved: bool,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
}

impl Skill {
    /// Create an approved skill with the given id and title; other fields empty
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            tags: Vec::new(),
            location: String::new(),
            level: String::new(),
            exchange_type: String::new(),
            image_url: String::new(),
            price: 0.0,
            created_at: Utc::now(),
            approved: true,
            user_id: String::new(),
            user_name: String::new(),
            user_avatar: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_exchange_type(mut self, exchange_type: impl Into<String>) -> Self {
        self.exchange_type = exchange_type.into();
        self
    }

    pub fn with_owner(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.user_name = user_name.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }
}

/// A skill submission from its owning user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSkill {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub tags: Vec<String>,
    pub level: Option<String>,
    pub exchange_type: Option<String>,
    pub image_url: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: Option<String>,
}

impl NewSkill {
    /// Level to store, falling back to [`DEFAULT_LEVEL`]
    pub fn level_or_default(&self) -> &str {
        non_blank(self.level.as_deref()).unwrap_or(DEFAULT_LEVEL)
    }

    /// Exchange type to store, falling back to [`DEFAULT_EXCHANGE_TYPE`]
    pub fn exchange_type_or_default(&self) -> &str {
        non_blank(self.exchange_type.as_deref()).unwrap_or(DEFAULT_EXCHANGE_TYPE)
    }

    /// Materialize the submission as a stored record
    ///
    /// New records are always approved; there is no moderation queue.
    pub fn into_skill(self, id: impl Into<String>, created_at: DateTime<Utc>) -> Skill {
        let level = self.level_or_default().to_string();
        let exchange_type = self.exchange_type_or_default().to_string();
        Skill {
            id: id.into(),
            title: self.title,
            description: self.description,
            category: self.category,
            tags: self.tags,
            location: self.location,
            level,
            exchange_type,
            image_url: self.image_url.unwrap_or_default(),
            price: 0.0,
            created_at,
            approved: true,
            user_id: self.user_id,
            user_name: self.user_name,
            user_avatar: self.user_avatar.unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
