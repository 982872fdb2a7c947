//! Session context
//!
//! Authentication status is held in an explicit context object that is
//! passed to whatever needs it. Its lifecycle is
//! `Initializing -> SignedOut | SignedIn`, then back to `SignedOut` on
//! sign-out. Subscribers observe every transition through a watch channel.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{Error, Result};

use super::entity::{AuthUser, Session};

/// Authentication state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Startup; the persisted session has not been checked yet
    Initializing,
    SignedOut,
    SignedIn { session: Session },
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::SignedOut => "signed_out",
            Self::SignedIn { .. } => "signed_in",
        }
    }
}

/// Shared handle to the current authentication state
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// A context in the `Initializing` state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Initializing);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Finish startup with the restored session, if any
    pub fn initialize(&self, restored: Option<Session>) {
        match restored {
            Some(session) => self.sign_in(session),
            None => self.transition(SessionState::SignedOut),
        }
    }

    pub fn sign_in(&self, session: Session) {
        self.transition(SessionState::SignedIn { session });
    }

    /// Tear the session down, returning it if one was active
    pub fn sign_out(&self) -> Option<Session> {
        match self.state.send_replace(SessionState::SignedOut) {
            SessionState::SignedIn { session } => {
                debug!(user_id = %session.user.id, "Session torn down");
                Some(session)
            }
            _ => None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(*self.state.borrow(), SessionState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::SignedIn { .. })
    }

    pub fn session(&self) -> Option<Session> {
        match &*self.state.borrow() {
            SessionState::SignedIn { session } => Some(session.clone()),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session().map(|s| s.user)
    }

    /// The signed-in user or a typed error naming the attempted action
    pub fn require_user(&self, action: &str) -> Result<AuthUser> {
        self.user()
            .ok_or_else(|| Error::NotAuthenticated(action.to_string()))
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn transition(&self, next: SessionState) {
        debug!(state = next.as_str(), "Session state changed");
        self.state.send_replace(next);
    }
}
