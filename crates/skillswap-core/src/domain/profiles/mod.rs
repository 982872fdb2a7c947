//! Profiles domain module
//!
//! User profile rows, partial updates and the service that combines a
//! profile with the skills its owner posted.

pub mod entity;
pub mod repository_trait;
pub mod service;
pub mod validation;

pub use entity::{ProfileUpdate, UserProfile};
pub use repository_trait::ProfileStore;
pub use service::{ProfileOverview, ProfileService};
pub use validation::ProfileValidator;
