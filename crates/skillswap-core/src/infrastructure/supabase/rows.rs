//! Row shapes of the Supabase tables
//!
//! The tables use snake_case columns; rows written by older clients carry
//! camelCase columns instead, sometimes next to the snake_case ones. The
//! snake_case value wins when non-empty. Normalization into domain types
//! happens once, here.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::profiles::UserProfile;
use crate::domain::skills::{NewSkill, Skill, entity::UNTITLED};

/// A `Skills` row as returned by PostgREST
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRow {
    #[serde(default)]
    pub id: serde_json::Value,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub exchange_type: Option<String>,
    #[serde(rename = "exchangeType")]
    pub exchange_type_camel: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url_camel: Option<String>,
    pub price: Option<f64>,
    pub created_at: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<String>,
    pub approved: Option<bool>,
    pub user_id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id_camel: Option<String>,
    pub user_name: Option<String>,
    #[serde(rename = "userName")]
    pub user_name_camel: Option<String>,
    pub user_avatar: Option<String>,
    #[serde(rename = "userAvatar")]
    pub user_avatar_camel: Option<String>,
}

/// The `tags` and `approved` columns
#[derive(Debug, Clone, Deserialize)]
pub struct TagsRow {
    pub tags: Option<Vec<String>>,
    pub approved: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn merged(snake: Option<String>, camel: Option<String>) -> String {
    non_empty(snake).or(camel).unwrap_or_default()
}

/// Parse a timestamp column, with or without an offset
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc())
                .ok()
        })
}

fn id_string(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SkillRow {
    /// Normalize into a [`Skill`]
    ///
    /// `now` stands in for a missing or unparsable creation time.
    pub fn into_skill(self, now: DateTime<Utc>) -> Skill {
        let created_at = non_empty(self.created_at)
            .or(self.created_at_camel)
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        Skill {
            id: id_string(&self.id),
            title: non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string()),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            exchange_type: merged(self.exchange_type, self.exchange_type_camel),
            image_url: merged(self.image_url, self.image_url_camel),
            price: self.price.unwrap_or(0.0),
            created_at,
            approved: self.approved.unwrap_or(false),
            user_id: merged(self.user_id, self.user_id_camel),
            user_name: merged(self.user_name, self.user_name_camel),
            user_avatar: merged(self.user_avatar, self.user_avatar_camel),
        }
    }
}

/// Insert payload for the `Skills` table
#[derive(Debug, Clone, Serialize)]
pub struct SkillInsert<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub tags: &'a [String],
    pub level: &'a str,
    pub exchange_type: &'a str,
    pub image_url: &'a str,
    pub user_id: &'a str,
    pub user_name: &'a str,
    pub user_avatar: &'a str,
    pub approved: bool,
}

impl<'a> From<&'a NewSkill> for SkillInsert<'a> {
    fn from(skill: &'a NewSkill) -> Self {
        Self {
            title: &skill.title,
            description: &skill.description,
            category: &skill.category,
            location: &skill.location,
            tags: &skill.tags,
            level: skill.level_or_default(),
            exchange_type: skill.exchange_type_or_default(),
            image_url: skill.image_url.as_deref().unwrap_or_default(),
            user_id: &skill.user_id,
            user_name: &skill.user_name,
            user_avatar: skill.user_avatar.as_deref().unwrap_or_default(),
            approved: true,
        }
    }
}

/// A `users` row as returned by PostgREST
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub uid: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
    pub updated_at: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub skill_tags: Option<Vec<String>>,
}

impl ProfileRow {
    pub fn into_profile(self, now: DateTime<Utc>) -> UserProfile {
        let ts = |raw: Option<String>| raw.as_deref().and_then(parse_timestamp);
        UserProfile {
            uid: self.uid,
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            created_at: ts(self.created_at).unwrap_or(now),
            last_login_at: ts(self.last_login_at),
            updated_at: ts(self.updated_at),
            bio: self.bio,
            location: self.location,
            avatar_url: self.avatar_url,
            skill_tags: self.skill_tags,
        }
    }
}

/// Insert payload for the `users` table
#[derive(Debug, Clone, Serialize)]
pub struct ProfileInsert<'a> {
    pub uid: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl<'a> From<&'a UserProfile> for ProfileInsert<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            uid: &profile.uid,
            full_name: &profile.full_name,
            email: &profile.email,
            created_at: profile.created_at.to_rfc3339(),
            last_login_at: profile.last_login_at.map(|at| at.to_rfc3339()),
        }
    }
}
