use crate::error::{Error, Result};

use super::entity::ProfileUpdate;

const MAX_BIO_LEN: usize = 500;

/// Validator for profile edits
pub struct ProfileValidator;

impl ProfileValidator {
    /// Validate a profile update
    ///
    /// Rules:
    /// - at least one field must be present
    /// - full name, when present, must not be blank
    /// - bio must be 500 characters or less
    /// - skill tags must not be blank
    pub fn validate_update(update: &ProfileUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(Error::validation("profile", "nothing to update"));
        }

        if let Some(name) = &update.full_name {
            if name.trim().is_empty() {
                return Err(Error::validation("full_name", "cannot be empty"));
            }
        }

        if let Some(bio) = &update.bio {
            if bio.chars().count() > MAX_BIO_LEN {
                return Err(Error::validation(
                    "bio",
                    format!("must be {} characters or less", MAX_BIO_LEN),
                ));
            }
        }

        if let Some(tags) = &update.skill_tags {
            if tags.iter().any(|t| t.trim().is_empty()) {
                return Err(Error::validation("skill_tags", "tags cannot be blank"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        assert!(ProfileValidator::validate_update(&ProfileUpdate::default()).is_err());
    }

    #[test]
    fn test_long_bio_rejected() {
        let update = ProfileUpdate {
            bio: Some("x".repeat(501)),
            ..Default::default()
        };
        let err = ProfileValidator::validate_update(&update).unwrap_err();
        assert!(err.to_string().contains("bio"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let update = ProfileUpdate {
            full_name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(ProfileValidator::validate_update(&update).is_err());
    }
}
