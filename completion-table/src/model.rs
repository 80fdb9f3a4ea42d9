//! Core data structures shared by the resolver, the transformer and the element.

/// Unix timestamp in seconds.
pub type Timestamp = i64;

pub type UserId = i64;

pub type CourseId = i64;

/// Activity (course module) id as written inside a `{completion:ID}` token.
pub type ActivityId = str;

/// The user a table is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
}

impl UserRef {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// An author-configured interval, both bounds inclusive, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
    pub label: String,
    pub enabled: bool,
}

impl DateRange {
    pub fn new(start: Timestamp, end: Timestamp, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether `timestamp` falls inside this range. Ignores `enabled`.
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Everything a completion table needs to render, as stored by the host.
///
/// Immutable for the duration of a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableConfig {
    pub content: String,
    pub fallback: String,
    pub date_ranges: Vec<DateRange>,
}

impl TableConfig {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_ranges.push(range);
        self
    }
}
