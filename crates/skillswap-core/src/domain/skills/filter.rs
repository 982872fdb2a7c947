//! Listing filter pipeline
//!
//! Four independent predicates over [`Skill`], all of which must hold:
//! category (matched against the category field or any tag), free-text
//! search, location substring and exact level. Every comparison is
//! case-insensitive and an empty criterion never constrains.

use serde::{Deserialize, Serialize};

use crate::domain::specification::{AndSpecification, Specification};

use super::entity::Skill;

/// Category sentinel meaning "no category constraint"
pub const ALL_CATEGORIES: &str = "All";

fn is_unconstrained_category(category: &str) -> bool {
    category.is_empty() || category == ALL_CATEGORIES
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Matches skills whose category, or any tag, equals the category
pub struct CategorySpec {
    category: String,
}

impl CategorySpec {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl Specification<Skill> for CategorySpec {
    fn is_satisfied_by(&self, skill: &Skill) -> bool {
        if is_unconstrained_category(&self.category) {
            return true;
        }

        eq_ignore_case(&skill.category, &self.category)
            || skill.tags.iter().any(|tag| eq_ignore_case(tag, &self.category))
    }
}

/// Matches skills whose title, description, category or a tag contains the term
pub struct SearchSpec {
    needle: String,
}

impl SearchSpec {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }
}

impl Specification<Skill> for SearchSpec {
    fn is_satisfied_by(&self, skill: &Skill) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        let contains = |field: &str| field.to_lowercase().contains(&self.needle);

        contains(&skill.title)
            || contains(&skill.description)
            || contains(&skill.category)
            || skill.tags.iter().any(|tag| contains(tag))
    }
}

/// Matches skills whose location contains the filter text
pub struct LocationSpec {
    needle: String,
}

impl LocationSpec {
    pub fn new(location: &str) -> Self {
        Self {
            needle: location.to_lowercase(),
        }
    }
}

impl Specification<Skill> for LocationSpec {
    fn is_satisfied_by(&self, skill: &Skill) -> bool {
        self.needle.is_empty() || skill.location.to_lowercase().contains(&self.needle)
    }
}

/// Matches skills at exactly this level
pub struct LevelSpec {
    level: String,
}

impl LevelSpec {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
        }
    }
}

impl Specification<Skill> for LevelSpec {
    fn is_satisfied_by(&self, skill: &Skill) -> bool {
        self.level.is_empty() || eq_ignore_case(&skill.level, &self.level)
    }
}

/// The filter criteria controlling which skill records are shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFilter {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub level: String,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for SkillFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: default_category(),
            location: String::new(),
            level: String::new(),
        }
    }
}

impl SkillFilter {
    /// Criteria with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// True if no criterion constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && is_unconstrained_category(&self.category)
            && self.location.is_empty()
            && self.level.is_empty()
    }

    /// True if a specific category is selected
    pub fn has_category(&self) -> bool {
        !is_unconstrained_category(&self.category)
    }

    /// Build the combined specification for these criteria
    pub fn to_spec(&self) -> AndSpecification<Skill> {
        CategorySpec::new(self.category.clone())
            .and(SearchSpec::new(&self.search_term))
            .and(LocationSpec::new(&self.location))
            .and(LevelSpec::new(self.level.clone()))
    }

    /// Check whether a single skill satisfies every criterion
    pub fn matches(&self, skill: &Skill) -> bool {
        self.to_spec().is_satisfied_by(skill)
    }

    /// Borrowing filter: matching skills in their original order
    pub fn select<'a>(&self, skills: &'a [Skill]) -> Vec<&'a Skill> {
        self.to_spec().select(skills)
    }

    /// Owning filter: matching skills in their original order
    pub fn apply(&self, skills: Vec<Skill>) -> Vec<Skill> {
        let spec = self.to_spec();
        skills
            .into_iter()
            .filter(|skill| spec.is_satisfied_by(skill))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guitar() -> Skill {
        Skill::new("1", "Guitar Basics")
            .with_description("Learn your first chords")
            .with_category("Music")
            .with_tags(["acoustic"])
            .with_location("Accra")
            .with_level("Beginner")
    }

    fn python() -> Skill {
        Skill::new("2", "Python 101")
            .with_description("Intro to programming")
            .with_category("Tech")
            .with_tags(["coding"])
            .with_location("Kumasi")
            .with_level("Intermediate")
    }

    #[test]
    fn test_category_matches_field_or_tag() {
        assert!(CategorySpec::new("music").is_satisfied_by(&guitar()));
        assert!(CategorySpec::new("ACOUSTIC").is_satisfied_by(&guitar()));
        assert!(!CategorySpec::new("Tech").is_satisfied_by(&guitar()));
        assert!(CategorySpec::new("All").is_satisfied_by(&guitar()));
        assert!(CategorySpec::new("").is_satisfied_by(&guitar()));
    }

    #[test]
    fn test_category_tag_must_match_exactly() {
        assert!(!CategorySpec::new("acou").is_satisfied_by(&guitar()));
    }

    #[test]
    fn test_search_covers_all_text_fields() {
        assert!(SearchSpec::new("guitar").is_satisfied_by(&guitar()));
        assert!(SearchSpec::new("CHORDS").is_satisfied_by(&guitar()));
        assert!(SearchSpec::new("mus").is_satisfied_by(&guitar()));
        assert!(SearchSpec::new("coust").is_satisfied_by(&guitar()));
        assert!(!SearchSpec::new("accra").is_satisfied_by(&guitar()));
    }

    #[test]
    fn test_location_is_substring() {
        assert!(LocationSpec::new("kum").is_satisfied_by(&python()));
        assert!(!LocationSpec::new("accra").is_satisfied_by(&python()));
    }

    #[test]
    fn test_level_is_exact() {
        assert!(LevelSpec::new("beginner").is_satisfied_by(&guitar()));
        assert!(!LevelSpec::new("Begin").is_satisfied_by(&guitar()));
    }

    #[test]
    fn test_missing_fields_do_not_fail() {
        let bare = Skill::new("3", "Knitting");
        assert!(SkillFilter::new().matches(&bare));
        assert!(!SkillFilter::new().with_location("Accra").matches(&bare));
        assert!(!SkillFilter::new().with_level("Beginner").matches(&bare));
        assert!(!SkillFilter::new().with_category("Crafts").matches(&bare));
    }

    #[test]
    fn test_is_unconstrained() {
        assert!(SkillFilter::new().is_unconstrained());
        assert!(SkillFilter::new().with_category("").is_unconstrained());
        assert!(!SkillFilter::new().with_level("Advanced").is_unconstrained());
        assert!(SkillFilter::new().with_category("Tech").has_category());
    }
}
