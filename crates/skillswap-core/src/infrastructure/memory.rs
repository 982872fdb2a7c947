//! In-memory implementations of the domain traits
//!
//! Used by tests and for running without a backend. Nothing is persisted.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::{AuthProvider, AuthUser, Session};
use crate::domain::profiles::{ProfileStore, ProfileUpdate, UserProfile};
use crate::domain::skills::{NewSkill, Skill, SkillSource};
use crate::error::{Error, Result};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| Error::Other("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| Error::Other("in-memory store lock poisoned".to_string()))
}

/// Skill records held in insertion order
#[derive(Debug, Default)]
pub struct InMemorySkillSource {
    skills: RwLock<Vec<Skill>>,
}

impl InMemorySkillSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records, approved or not
    pub fn with_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self {
            skills: RwLock::new(skills.into_iter().collect()),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        Ok(read(&self.skills)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SkillSource for InMemorySkillSource {
    async fn fetch_approved(&self) -> Result<Vec<Skill>> {
        Ok(read(&self.skills)?
            .iter()
            .filter(|s| s.approved)
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Skill>> {
        Ok(read(&self.skills)?.iter().find(|s| s.id == id).cloned())
    }

    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<Skill>> {
        let mut skills: Vec<Skill> = read(&self.skills)?
            .iter()
            .filter(|s| s.approved && s.user_id == user_id)
            .cloned()
            .collect();
        skills.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(skills)
    }

    async fn create(&self, skill: &NewSkill) -> Result<Skill> {
        let created = skill
            .clone()
            .into_skill(Uuid::new_v4().to_string(), Utc::now());
        write(&self.skills)?.push(created.clone());
        Ok(created)
    }
}

/// Profiles keyed by uid
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(read(&self.profiles)?.get(uid).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> Result<()> {
        write(&self.profiles)?.insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, uid: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut profiles = write(&self.profiles)?;
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| Error::ProfileNotFound(uid.to_string()))?;
        profile.apply(update);
        Ok(profile.clone())
    }

    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> Result<()> {
        if let Some(profile) = write(&self.profiles)?.get_mut(uid) {
            profile.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password: String,
}

/// Accounts and issued tokens held in memory
///
/// Rejections use the same wording as the hosted provider so message
/// mapping behaves identically.
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    tokens: RwLock<HashMap<String, String>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tokens
    pub fn active_sessions(&self) -> Result<usize> {
        Ok(read(&self.tokens)?.len())
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthUser> {
        let mut accounts = write(&self.accounts)?;
        if accounts.contains_key(email) {
            return Err(Error::AuthFailed("User already registered".to_string()));
        }

        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: Some(full_name.to_string()),
            avatar_url: None,
        };
        accounts.insert(
            email.to_string(),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let user = read(&self.accounts)?
            .get(email)
            .filter(|account| account.password == password)
            .map(|account| account.user.clone())
            .ok_or_else(|| Error::AuthFailed("Invalid login credentials".to_string()))?;

        let access_token = Uuid::new_v4().to_string();
        write(&self.tokens)?.insert(access_token.clone(), user.id.clone());
        Ok(Session {
            user,
            access_token,
            refresh_token: None,
            expires_at: None,
        })
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        write(&self.tokens)?.remove(&session.access_token);
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> Result<Option<AuthUser>> {
        let Some(uid) = read(&self.tokens)?.get(&session.access_token).cloned() else {
            return Ok(None);
        };
        Ok(read(&self.accounts)?
            .values()
            .find(|account| account.user.id == uid)
            .map(|account| account.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_skill_source_filters_and_orders() {
        let now = Utc::now();
        let source = InMemorySkillSource::with_skills([
            Skill::new("1", "Old").with_owner("u1", "Ama").with_created_at(now - Duration::days(2)),
            Skill::new("2", "Hidden").with_owner("u1", "Ama").with_approved(false),
            Skill::new("3", "New").with_owner("u1", "Ama").with_created_at(now),
        ]);

        assert_eq!(source.fetch_approved().await.unwrap().len(), 2);
        let mine = source.fetch_by_user("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, "3");
        assert_eq!(source.len().unwrap(), 3);
        assert!(source.fetch_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_auth_provider_round_trip() {
        let provider = InMemoryAuthProvider::new();
        provider.sign_up("a@x.io", "secret1", "Ama").await.unwrap();

        let err = provider.sign_up("a@x.io", "secret1", "Ama").await.unwrap_err();
        assert!(matches!(err, Error::AuthFailed(_)));
        assert!(provider.sign_in("a@x.io", "wrong").await.is_err());

        let session = provider.sign_in("a@x.io", "secret1").await.unwrap();
        assert!(provider.current_user(&session).await.unwrap().is_some());

        provider.sign_out(&session).await.unwrap();
        assert!(provider.current_user(&session).await.unwrap().is_none());
        assert_eq!(provider.active_sessions().unwrap(), 0);
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let source = std::sync::Arc::new(InMemorySkillSource::new());
        let poisoner = std::sync::Arc::clone(&source);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.skills.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(source.len(), Err(Error::Other(_))));
        assert!(source.is_empty().is_err());
    }

    #[tokio::test]
    async fn test_profile_update_requires_existing_row() {
        let store = InMemoryProfileStore::new();
        let update = ProfileUpdate {
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update("nobody", &update).await,
            Err(Error::ProfileNotFound(_))
        ));
    }
}
