//! Service wiring
//!
//! Builds the catalog, profile and auth services over one backend and
//! hands them out as a single explicit value. Front ends hold a
//! [`SkillSwap`] instead of reaching for global state.

pub mod health;

use std::sync::Arc;

use crate::config::Config;
use crate::domain::auth::{AuthProvider, AuthService, SessionContext, SessionStore};
use crate::domain::profiles::{ProfileService, ProfileStore};
use crate::domain::skills::{SkillCatalog, SkillSource};
use crate::infrastructure::{
    FileSessionStore, InMemoryAuthProvider, InMemoryProfileStore, InMemorySkillSource,
    MemorySessionStore, SupabaseAuth, SupabaseClient, SupabaseProfileStore, SupabaseSkillSource,
};
use crate::Result;

/// The application services over one backend
#[derive(Clone)]
pub struct SkillSwap {
    pub catalog: SkillCatalog,
    pub profiles: ProfileService,
    pub auth: AuthService,
}

impl std::fmt::Debug for SkillSwap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillSwap")
            .field("session", &self.auth.context().state().as_str())
            .finish_non_exhaustive()
    }
}

impl SkillSwap {
    /// Wire services from explicit parts
    pub fn from_parts(
        skills: Arc<dyn SkillSource>,
        profiles: Arc<dyn ProfileStore>,
        provider: Arc<dyn AuthProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let catalog = SkillCatalog::new(skills);
        Self {
            profiles: ProfileService::new(profiles.clone(), catalog.clone()),
            auth: AuthService::new(provider, profiles, sessions, SessionContext::new()),
            catalog,
        }
    }

    /// Connect to the configured Supabase project
    ///
    /// The session is kept in the config directory. Call
    /// [`SkillSwap::initialize`] before use to restore it.
    pub fn connect(config: &Config) -> Result<Self> {
        let client = SupabaseClient::from_config(config)?;
        let sessions = FileSessionStore::in_config_dir()?;
        Ok(Self::from_parts(
            Arc::new(SupabaseSkillSource::new(
                client.clone(),
                &config.backend.skills_table,
            )),
            Arc::new(SupabaseProfileStore::new(
                client.clone(),
                &config.backend.users_table,
            )),
            Arc::new(SupabaseAuth::new(client)),
            Arc::new(sessions),
        ))
    }

    /// Services over in-memory stores
    pub fn in_memory(skills: InMemorySkillSource) -> Self {
        Self::from_parts(
            Arc::new(skills),
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(InMemoryAuthProvider::new()),
            Arc::new(MemorySessionStore::new()),
        )
    }

    /// Restore the stored session
    pub async fn initialize(&self) -> Result<()> {
        self.auth.initialize().await
    }

    pub fn session(&self) -> &SessionContext {
        self.auth.context()
    }
}
