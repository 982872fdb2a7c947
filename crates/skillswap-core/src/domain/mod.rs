//! Domain layer
//!
//! Contains the core business logic and domain models.

pub mod auth;
pub mod profiles;
pub mod skills;
pub mod specification;
