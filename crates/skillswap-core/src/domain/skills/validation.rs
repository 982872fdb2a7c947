use crate::error::{Error, Result};

use super::entity::NewSkill;

const MAX_TITLE_LEN: usize = 120;
const MAX_DESCRIPTION_LEN: usize = 2000;

/// Validates skill submissions before they are written
pub struct SkillValidator;

impl SkillValidator {
    /// Check required fields of a submission
    ///
    /// Rules:
    /// - title, description, category and location must not be blank
    /// - title is at most 120 characters, description at most 2000
    /// - the owner must be known
    pub fn validate(skill: &NewSkill) -> Result<()> {
        required("title", &skill.title)?;
        required("description", &skill.description)?;
        required("category", &skill.category)?;
        required("location", &skill.location)?;

        if skill.title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::validation(
                "title",
                format!("must be {} characters or less", MAX_TITLE_LEN),
            ));
        }
        if skill.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::validation(
                "description",
                format!("must be {} characters or less", MAX_DESCRIPTION_LEN),
            ));
        }
        if skill.user_id.trim().is_empty() {
            return Err(Error::NotAuthenticated("post a skill".to_string()));
        }
        if skill.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(Error::validation("tags", "tags cannot be blank"));
        }

        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(field, "is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewSkill {
        NewSkill {
            title: "Python 101".to_string(),
            description: "Intro course".to_string(),
            category: "Tech".to_string(),
            location: "Kumasi".to_string(),
            tags: vec!["coding".to_string()],
            level: None,
            exchange_type: None,
            image_url: None,
            user_id: "u1".to_string(),
            user_name: "Kofi".to_string(),
            user_avatar: None,
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(SkillValidator::validate(&valid()).is_ok());
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut skill = valid();
        skill.location = "   ".to_string();
        let err = SkillValidator::validate(&skill).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "location"));
    }

    #[test]
    fn test_missing_owner_requires_login() {
        let mut skill = valid();
        skill.user_id.clear();
        assert!(matches!(
            SkillValidator::validate(&skill),
            Err(Error::NotAuthenticated(_))
        ));
    }
}
