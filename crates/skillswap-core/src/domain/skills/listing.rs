//! Listing state with stale-fetch protection
//!
//! Each fetch is tagged with a generation token. A completion whose token
//! is not the latest one issued is discarded, so a slow, superseded fetch
//! can never overwrite newer results.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

use super::entity::Skill;
use super::filter::SkillFilter;
use super::tags::extract_tags;

/// Token identifying one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchToken(u64);

/// Load state of the record collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Latest skill collection plus the current filter criteria
#[derive(Debug, Default)]
pub struct SkillListing {
    generation: u64,
    skills: Vec<Skill>,
    state: LoadState,
    criteria: SkillFilter,
}

impl SkillListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: SkillFilter) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Start a fetch; its result must be passed back with this token
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchToken(self.generation)
    }

    /// Apply a fetch result if it belongs to the latest fetch
    ///
    /// Returns `false` when the result was stale and discarded. Unapproved
    /// records are dropped here so they never reach filtering.
    pub fn complete(&mut self, token: FetchToken, result: Result<Vec<Skill>>) -> bool {
        if token.0 != self.generation {
            debug!(
                token = token.0,
                latest = self.generation,
                "Discarding stale skill fetch"
            );
            return false;
        }

        match result {
            Ok(skills) => {
                self.skills = skills.into_iter().filter(|s| s.approved).collect();
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                self.skills.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn criteria(&self) -> &SkillFilter {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: SkillFilter) {
        self.criteria = criteria;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.category = category.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.criteria.location = location.into();
    }

    pub fn set_level(&mut self, level: impl Into<String>) {
        self.criteria.level = level.into();
    }

    /// All approved records from the latest applied fetch
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Records matching the current criteria, in source order
    pub fn visible(&self) -> Vec<&Skill> {
        self.criteria.select(&self.skills)
    }

    /// Filter options derived from the latest collection
    pub fn tags(&self) -> Vec<String> {
        extract_tags(&self.skills)
    }

    /// Result-count line for display
    pub fn summary(&self) -> String {
        let count = self.visible().len();
        let mut line = format!(
            "Showing {} skill{}",
            count,
            if count == 1 { "" } else { "s" }
        );
        if self.criteria.has_category() {
            line.push_str(&format!(" in \"{}\"", self.criteria.category));
        }
        if !self.criteria.search_term.is_empty() {
            line.push_str(&format!(" for \"{}\"", self.criteria.search_term));
        }
        line
    }
}
