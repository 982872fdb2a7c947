//! Distinct tag extraction for filter options

use std::collections::BTreeSet;

use super::entity::Skill;

/// Distinct tags across all skills, sorted ascending
pub fn extract_tags<'a, I>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Skill>,
{
    collect_sorted(skills.into_iter().flat_map(|skill| skill.tags.iter()))
}

/// Distinct tags across raw tag columns, sorted ascending
///
/// Used when only the `tags` column was fetched from the store.
pub fn extract_tag_sets<I, T>(tag_sets: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = String>,
{
    tag_sets
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn collect_sorted<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<String> {
    tags.map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
