//! Auth provider and session persistence traits

use async_trait::async_trait;

use crate::error::Result;

use super::entity::{AuthUser, Session};

/// External authentication provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register an account; the full name is stored as user metadata
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthUser>;

    /// Exchange credentials for a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Revoke a session
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Resolve the user behind a session, `None` if it is no longer valid
    async fn current_user(&self, session: &Session) -> Result<Option<AuthUser>>;
}

/// Persistence for the signed-in session between runs
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;

    fn save(&self, session: &Session) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn AuthProvider, _: &dyn SessionStore) {}
}
