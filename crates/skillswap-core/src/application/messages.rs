//! User-facing failure messages
//!
//! Backend and provider failures are mapped to a small set of messages by
//! substring matching on the backend text. Anything unmatched is passed
//! through verbatim; errors without backend text use the action's fallback.

use crate::error::Error;

/// The write action that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateSkill,
    SignUp,
    SignIn,
    UpdateProfile,
}

impl Action {
    fn fallback(self) -> &'static str {
        match self {
            Self::CreateSkill => "An error occurred while creating the skill",
            Self::SignUp => "An error occurred during sign up",
            Self::SignIn => "An error occurred during sign in",
            Self::UpdateProfile => "Failed to update profile",
        }
    }

    /// Ordered (needle, message) pairs; the first match wins
    fn rules(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::CreateSkill => &[
                ("duplicate", "A skill with this title already exists"),
                ("permission", "You don't have permission to create skills"),
            ],
            Self::SignUp => &[
                ("already registered", "An account with this email already exists"),
                ("Password", "Password is too weak"),
                ("email", "Invalid email address"),
            ],
            Self::SignIn => &[
                ("Invalid login credentials", "Incorrect email or password"),
                ("Email not confirmed", "Please verify your email address"),
                ("email", "Invalid email address"),
            ],
            Self::UpdateProfile => &[],
        }
    }
}

/// Map a raw backend message for an action
pub fn map_message(action: Action, raw: &str) -> String {
    action
        .rules()
        .iter()
        .find(|(needle, _)| raw.contains(needle))
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Message to show the user for a failed action
pub fn user_message(action: Action, error: &Error) -> String {
    match error {
        // Local validation and login requirements already read well
        Error::Validation { .. } | Error::NotAuthenticated(_) => error.to_string(),
        _ => match error.backend_message() {
            Some(raw) if !raw.is_empty() => map_message(action, raw),
            _ => action.fallback().to_string(),
        },
    }
}
