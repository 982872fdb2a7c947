//! SkillSwap Core Library
//!
//! This crate provides the core functionality for SkillSwap, a community
//! marketplace where people offer skills to teach or exchange:
//! - Skill catalog (approved-only browsing, filtering, tag options)
//! - Skill submission with validation
//! - User profiles and the skills their owners posted
//! - Authentication with an explicit session context
//! - Supabase (PostgREST + GoTrue) backend adapters
//! - In-memory backends for tests and offline use

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::SkillSwap;
    pub use crate::config::Config;
    pub use crate::domain::auth::{AuthUser, Login, Session, SessionState, SignUp};
    pub use crate::domain::profiles::{ProfileUpdate, UserProfile};
    pub use crate::domain::skills::{NewSkill, Skill, SkillFilter};
    pub use crate::error::{Error, Result};
}

#[cfg(test)]
mod config_tests;
