//! Application layer
//!
//! Turns raw form input into domain submissions and domain failures into
//! messages for the user.

pub mod forms;
pub mod messages;

pub use forms::{SkillForm, parse_tags};
pub use messages::{Action, map_message, user_message};
