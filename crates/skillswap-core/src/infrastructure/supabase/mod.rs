//! Supabase backend
//!
//! - `client`: shared HTTP client, headers and error decoding
//! - `rows`: table row shapes and normalization
//! - `skills`, `profiles`, `auth`: adapters for the domain traits

pub mod auth;
pub mod client;
pub mod profiles;
pub mod rows;
pub mod skills;

pub use auth::SupabaseAuth;
pub use client::{SupabaseClient, SupabaseClientBuilder};
pub use profiles::SupabaseProfileStore;
pub use skills::SupabaseSkillSource;
