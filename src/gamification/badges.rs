//! Badge definitions and deduplication
//!
//! The backend may report the same badge more than once (repeated pushes of
//! the same unlock). Every badge list entering the store goes through
//! [`dedup_badges`] so that display code never sees duplicates.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An unlocked achievement. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display glyph (usually an emoji)
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            earned_at: None,
        }
    }
}

/// Keep one badge per id, in order of first occurrence
pub fn dedup_badges<I>(badges: I) -> Vec<Badge>
where
    I: IntoIterator<Item = Badge>,
{
    let mut seen = HashSet::new();
    badges
        .into_iter()
        .filter(|badge| seen.insert(badge.id.clone()))
        .collect()
}

/// Append `incoming` to `existing`, skipping ids already present.
///
/// Returns the badges that were actually new.
pub fn merge_badges(existing: &mut Vec<Badge>, incoming: Vec<Badge>) -> Vec<Badge> {
    let known: HashSet<String> = existing.iter().map(|b| b.id.clone()).collect();
    let added: Vec<Badge> = dedup_badges(incoming)
        .into_iter()
        .filter(|badge| !known.contains(&badge.id))
        .collect();
    existing.extend(added.iter().cloned());
    added
}
