//! Authentication domain module
//!
//! # Architecture
//!
//! - **Entities**: `AuthUser`, `Session`, `SignUp`, `Login`
//! - **Context**: `SessionContext`, the explicit, watchable auth state
//! - **Traits**: `AuthProvider` for the external provider, `SessionStore`
//!   for keeping the session between runs
//! - **Service**: `AuthService` for sign-up, sign-in and sign-out

pub mod context;
pub mod entity;
pub mod provider;
pub mod service;
pub mod validation;

pub use context::{SessionContext, SessionState};
pub use entity::{AuthUser, Login, Session, SignUp};
pub use provider::{AuthProvider, SessionStore};
pub use service::AuthService;
pub use validation::CredentialsValidator;
