//! Error types for SkillSwap

use thiserror::Error;

/// Result type alias using SkillSwap's Error
pub type Result<T> = std::result::Result<T, Error>;

/// SkillSwap error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Skill '{0}' not found. Run `skillswap skills list` to see all skills.")]
    SkillNotFound(String),

    #[error("Profile '{0}' not found.")]
    ProfileNotFound(String),

    // Network errors (E100-E199)
    #[error("Network error: {0}. Check your internet connection.")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),

    // Auth errors (E200-E299)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("You must be logged in to {0}. Run `skillswap auth login` first.")]
    NotAuthenticated(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a field-level validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::SkillNotFound(_) => "E001",
            Self::ProfileNotFound(_) => "E002",
            Self::NetworkError(_) => "E100",
            Self::Backend { .. } => "E101",
            Self::InvalidResponse(_) => "E102",
            Self::AuthFailed(_) => "E200",
            Self::NotAuthenticated(_) => "E201",
            Self::ConfigError(_) => "E600",
            Self::Validation { .. } => "E800",
            Self::Serialization(_) => "E900",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::SkillNotFound(_) => Some("skillswap skills list".to_string()),
            Self::NetworkError(_) => Some("Check internet connection".to_string()),
            Self::NotAuthenticated(_) => Some("skillswap auth login".to_string()),
            Self::ConfigError(_) => Some(
                "Set SKILLSWAP_SUPABASE_URL and SKILLSWAP_SUPABASE_ANON_KEY".to_string(),
            ),
            _ => None,
        }
    }

    /// The raw message reported by the backend or provider, if any
    ///
    /// User-facing message mapping matches against this text.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } | Self::AuthFailed(message) => Some(message),
            Self::Validation { message, .. } => Some(message),
            Self::Other(message) => Some(message),
            _ => None,
        }
    }
}
