//! Skills domain module
//!
//! # Architecture
//!
//! - **Entities**: `Skill`, `NewSkill`
//! - **Filtering**: `SkillFilter` composed of category, search, location
//!   and level specifications
//! - **Tags**: distinct, sorted tag extraction for filter options
//! - **Listing**: `SkillListing` load state with generation tokens
//! - **Repository**: `SkillSource` trait implemented by the infrastructure layer
//! - **Service**: `SkillCatalog` enforcing the approved-only invariant
//!
//! # Example
//!
//! ```ignore
//! use skillswap_core::domain::skills::{SkillCatalog, SkillFilter};
//!
//! let catalog = SkillCatalog::new(source);
//! let filter = SkillFilter::new().with_category("Tech").with_location("kumasi");
//! let skills = catalog.list(&filter).await?;
//! ```

pub mod entity;
pub mod filter;
pub mod listing;
pub mod repository_trait;
pub mod service;
pub mod tags;
pub mod validation;

pub use entity::{DEFAULT_EXCHANGE_TYPE, DEFAULT_LEVEL, NewSkill, Skill};
pub use filter::{ALL_CATEGORIES, CategorySpec, LevelSpec, LocationSpec, SearchSpec, SkillFilter};
pub use listing::{FetchToken, LoadState, SkillListing};
pub use repository_trait::SkillSource;
pub use service::SkillCatalog;
pub use tags::{extract_tag_sets, extract_tags};
pub use validation::SkillValidator;
