//! Repository trait for user profiles

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

use super::entity::{ProfileUpdate, UserProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get a profile by user id
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Insert the profile row for a new account
    async fn create(&self, profile: &UserProfile) -> Result<()>;

    /// Apply a partial update and return the stored profile
    async fn update(&self, uid: &str, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Record a successful sign-in
    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> Result<()>;
}
