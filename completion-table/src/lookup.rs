//! Host lookups
//!
//! The transformer never talks to a data store directly. Everything it needs from the host
//! comes through these traits, queried once per token or section line, without caching.
//! [`MemoryStore`] implements all of them from plain data and backs the CLI fixtures.

use crate::error::LookupError;
use crate::model::{ActivityId, CourseId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user's completion of one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    pub completed_at: Timestamp,
}

/// One course section matching a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRecord {
    pub visible: bool,
}

/// Activity existence and per-user completion.
pub trait CompletionLookup {
    /// Whether an activity with this id exists.
    fn activity_exists(&self, activity_id: &ActivityId) -> Result<bool, LookupError>;

    /// The user's completion record for the activity, if any.
    fn completion(
        &self,
        activity_id: &ActivityId,
        user_id: UserId,
    ) -> Result<Option<CompletionRecord>, LookupError>;
}

/// Course sections by name. An empty result means the section was not found.
pub trait SectionLookup {
    fn sections(&self, course_id: CourseId, label: &str) -> Result<Vec<SectionRecord>, LookupError>;
}

/// Maps an element to the course it belongs to.
pub trait CourseResolver {
    fn course_id(&self, element_id: i64) -> Option<CourseId>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCompletion {
    pub activity: String,
    pub user: UserId,
    pub completed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSection {
    pub course: CourseId,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// In-memory lookup data, loadable from JSON.
///
/// ```text
/// {
///   "activities": ["42"],
///   "completions": [{"activity": "42", "user": 7, "completed_at": 1614834360}],
///   "sections": [{"course": 3, "name": "Week 1", "visible": true}],
///   "elements": {"12": 3}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub completions: Vec<StoredCompletion>,
    #[serde(default)]
    pub sections: Vec<StoredSection>,
    #[serde(default)]
    pub elements: HashMap<String, CourseId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activities.push(activity.into());
        self
    }

    pub fn with_completion(
        mut self,
        activity: impl Into<String>,
        user: UserId,
        completed_at: Timestamp,
    ) -> Self {
        self.completions.push(StoredCompletion {
            activity: activity.into(),
            user,
            completed_at,
        });
        self
    }

    pub fn with_section(mut self, course: CourseId, name: impl Into<String>, visible: bool) -> Self {
        self.sections.push(StoredSection {
            course,
            name: name.into(),
            visible,
        });
        self
    }

    pub fn with_element(mut self, element_id: i64, course: CourseId) -> Self {
        self.elements.insert(element_id.to_string(), course);
        self
    }
}

impl CompletionLookup for MemoryStore {
    fn activity_exists(&self, activity_id: &ActivityId) -> Result<bool, LookupError> {
        Ok(self.activities.iter().any(|id| id == activity_id))
    }

    fn completion(
        &self,
        activity_id: &ActivityId,
        user_id: UserId,
    ) -> Result<Option<CompletionRecord>, LookupError> {
        Ok(self
            .completions
            .iter()
            .find(|c| c.activity == activity_id && c.user == user_id)
            .map(|c| CompletionRecord {
                completed_at: c.completed_at,
            }))
    }
}

impl SectionLookup for MemoryStore {
    fn sections(&self, course_id: CourseId, label: &str) -> Result<Vec<SectionRecord>, LookupError> {
        Ok(self
            .sections
            .iter()
            .filter(|s| s.course == course_id && s.name == label)
            .map(|s| SectionRecord { visible: s.visible })
            .collect())
    }
}

impl CourseResolver for MemoryStore {
    fn course_id(&self, element_id: i64) -> Option<CourseId> {
        self.elements.get(&element_id.to_string()).copied()
    }
}
