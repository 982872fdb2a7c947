//! Infrastructure layer
//!
//! Concrete implementations of the domain traits:
//!
//! - **supabase**: PostgREST and GoTrue adapters
//! - **memory**: in-memory stores for tests and offline use
//! - **session_store**: keeping the signed-in session between runs

pub mod memory;
pub mod session_store;
pub mod supabase;

pub use memory::{InMemoryAuthProvider, InMemoryProfileStore, InMemorySkillSource};
pub use session_store::{FileSessionStore, MemorySessionStore};
pub use supabase::{
    SupabaseAuth, SupabaseClient, SupabaseProfileStore, SupabaseSkillSource,
};
