//! Validation of submitted authoring forms.

use crate::form::{self, FormData};
use crate::strings;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name → message. A later error on the same field replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Check a submission.
///
/// `max_width` of 0 (or less) disables the upper width bound. Enabled slots need a date string
/// and a start strictly before their end; errors are keyed by the slot's group (`group3`).
pub fn validate(data: &FormData, max_width: i64) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(width) = data.int(form::WIDTH) {
        if width < 0 {
            errors.insert(form::WIDTH, strings::ERROR_WIDTH_NEGATIVE);
        } else if max_width > 0 && width > max_width {
            errors.insert(form::WIDTH, strings::error_width_too_large(max_width));
        }
    }

    for slot in data.submitted_slots() {
        if !data.is_checked(&form::slot_field(form::ENABLED, slot)) {
            continue;
        }
        let group = form::slot_field(form::GROUP, slot);

        if data.text(&form::slot_field(form::DATE_STRING, slot)).is_empty() {
            errors.insert(group.clone(), strings::ERROR_DATE_STRING);
        }

        let start = data.int(&form::slot_field(form::START_DATE, slot)).unwrap_or(0);
        let end = data.int(&form::slot_field(form::END_DATE, slot)).unwrap_or(0);
        if start >= end {
            errors.insert(group, strings::ERROR_DATE);
        }
    }

    errors
}
