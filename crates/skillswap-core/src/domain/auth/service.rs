//! Authentication service
//!
//! Drives the provider, keeps the profile table in step with accounts,
//! and moves the [`SessionContext`] through its lifecycle.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::context::SessionContext;
use super::entity::{AuthUser, Login, Session, SignUp};
use super::provider::{AuthProvider, SessionStore};
use super::validation::CredentialsValidator;
use crate::domain::profiles::{ProfileStore, UserProfile};
use crate::error::Result;

#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    sessions: Arc<dyn SessionStore>,
    context: SessionContext,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
        sessions: Arc<dyn SessionStore>,
        context: SessionContext,
    ) -> Self {
        Self {
            provider,
            profiles,
            sessions,
            context,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Restore the persisted session and initialize the context
    ///
    /// A stored session that has expired or that the provider no longer
    /// recognizes is discarded. Provider failures leave the stored session
    /// in place but start signed out.
    pub async fn initialize(&self) -> Result<()> {
        let restored = match self.sessions.load()? {
            Some(session) if session.is_expired(Utc::now()) => {
                info!("Stored session expired");
                self.sessions.clear()?;
                None
            }
            Some(session) => match self.provider.current_user(&session).await {
                Ok(Some(user)) => Some(Session { user, ..session }),
                Ok(None) => {
                    info!("Stored session no longer valid");
                    self.sessions.clear()?;
                    None
                }
                Err(e) => {
                    warn!(error = %e, "Could not verify stored session");
                    None
                }
            },
            None => None,
        };

        self.context.initialize(restored);
        Ok(())
    }

    /// Register an account and create its profile row
    ///
    /// A failed profile insert is logged and does not fail the sign-up.
    pub async fn sign_up(&self, form: &SignUp) -> Result<AuthUser> {
        CredentialsValidator::validate_sign_up(form)?;

        let full_name = form.full_name.trim();
        let email = form.email.trim();
        let user = self.provider.sign_up(email, &form.password, full_name).await?;

        let profile = UserProfile::new(&user.id, full_name, email);
        if let Err(e) = self.profiles.create(&profile).await {
            warn!(uid = %user.id, error = %e, "Error creating user document");
        }

        info!(uid = %user.id, "Account created");
        Ok(user)
    }

    /// Sign in, record the login time and install the session
    pub async fn sign_in(&self, form: &Login) -> Result<Session> {
        CredentialsValidator::validate_login(form)?;

        let session = self
            .provider
            .sign_in(form.email.trim(), &form.password)
            .await?;

        if let Err(e) = self
            .profiles
            .touch_last_login(&session.user.id, Utc::now())
            .await
        {
            warn!(uid = %session.user.id, error = %e, "Error updating last login");
        }

        self.sessions.save(&session)?;
        self.context.sign_in(session.clone());
        info!(uid = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Revoke and tear down the current session
    ///
    /// The local session is always removed, even if revocation fails.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.context.sign_out() {
            if let Err(e) = self.provider.sign_out(&session).await {
                warn!(error = %e, "Error revoking session");
            }
            info!(uid = %session.user.id, "Signed out");
        }
        self.sessions.clear()
    }
}
