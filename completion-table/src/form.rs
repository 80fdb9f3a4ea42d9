//! Authoring form
//!
//! The host renders the element's settings form from [`FormField`] descriptors and hands the
//! submission back as [`FormData`]: a flat map of field name to submitted value. Per-range
//! fields are numbered by slot (`startdate0`, `datestring3`, ...).

use crate::model::{DateRange, TableConfig, Timestamp};
use crate::strings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub const CONTENT: &str = "content";
pub const FALLBACK: &str = "fallbackstring";
pub const NUM_RANGES: &str = "numranges";
pub const WIDTH: &str = "width";
pub const START_DATE: &str = "startdate";
pub const END_DATE: &str = "enddate";
pub const DATE_STRING: &str = "datestring";
pub const ENABLED: &str = "enabled";
pub const GROUP: &str = "group";

/// Name of a per-slot field, e.g. `slot_field("datestring", 2)` → `datestring2`.
pub fn slot_field(name: &str, slot: usize) -> String {
    format!("{name}{slot}")
}

/// Slot number of a per-slot field name, e.g. `datestring2` → 2.
fn slot_index(name: &str) -> Option<usize> {
    [START_DATE, END_DATE, DATE_STRING, ENABLED]
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix)?.parse().ok())
}

/// Description of one form element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    TextArea { rows: u32, cols: u32 },
    Text,
    Hidden { value: String },
    Header,
    Static { text: String },
    DateSelector,
    Checkbox,
    /// Elements shown on one line, disabled unless the named checkbox is ticked
    Group {
        elements: Vec<FormField>,
        disabled_unless: String,
    },
}

impl FormField {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            help: None,
        }
    }

    fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }
}

/// Form descriptors for an element offering `max_ranges` date-range slots.
pub fn form_fields(max_ranges: usize) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new(CONTENT, strings::CONTENT, FieldKind::TextArea { rows: 20, cols: 100 })
            .with_help(strings::CONTENT_HELP),
        FormField::new("dateranges", strings::DATE_RANGES, FieldKind::Header),
        FormField::new(
            "help",
            "",
            FieldKind::Static {
                text: strings::DATE_RANGES_HELP.to_string(),
            },
        ),
        FormField::new(FALLBACK, strings::FALLBACK_STRING, FieldKind::Text)
            .with_help(strings::FALLBACK_STRING_HELP),
        FormField::new(
            NUM_RANGES,
            "",
            FieldKind::Hidden {
                value: max_ranges.to_string(),
            },
        ),
    ];

    for slot in 0..max_ranges {
        let elements = vec![
            FormField::new(slot_field(START_DATE, slot), strings::START_DATE, FieldKind::DateSelector),
            FormField::new(slot_field(END_DATE, slot), strings::END_DATE, FieldKind::DateSelector),
            FormField::new(slot_field(DATE_STRING, slot), strings::DATE_STRING, FieldKind::Text),
            FormField::new(slot_field(ENABLED, slot), strings::ENABLE, FieldKind::Checkbox),
        ];
        fields.push(FormField::new(
            slot_field(GROUP, slot),
            strings::date_range(slot + 1),
            FieldKind::Group {
                elements,
                disabled_unless: slot_field(ENABLED, slot),
            },
        ));
    }

    fields
}

/// A submitted (or prefilled) form: field name → value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object. Numbers and booleans are stored as their form representation
    /// (`true` → `"1"`, `false` → `""`); nulls are skipped.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(source)?;
        let mut data = FormData::new();
        for (key, value) in object {
            let value = match value {
                Value::Null => continue,
                Value::Bool(true) => "1".to_string(),
                Value::Bool(false) => String::new(),
                Value::String(text) => text,
                other => other.to_string(),
            };
            data.set(key, value);
        }
        Ok(data)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Submitted text, empty when absent.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Integer value when present. Unparseable values count as 0.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name)
            .map(|value| value.trim().parse::<i64>().unwrap_or(0))
    }

    /// Whether a checkbox (or any flag) was submitted as set.
    pub fn is_checked(&self, name: &str) -> bool {
        !matches!(self.get(name), None | Some("") | Some("0"))
    }

    /// Number of range slots in the submission.
    pub fn num_ranges(&self) -> usize {
        self.int(NUM_RANGES)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }

    /// Slots below `numranges` that have at least one submitted field, in slot order.
    ///
    /// Slots without fields contribute nothing, so skipping them keeps a huge `numranges` cheap.
    pub fn submitted_slots(&self) -> BTreeSet<usize> {
        let limit = self.num_ranges();
        self.values
            .keys()
            .filter_map(|name| slot_index(name))
            .filter(|slot| *slot < limit)
            .collect()
    }
}

/// Build the configuration to store from a submission.
///
/// Only slots with a date string are kept, in slot order.
pub fn config_from_form(data: &FormData) -> TableConfig {
    let date_ranges = data
        .submitted_slots()
        .into_iter()
        .filter_map(|slot| {
            let label = data.text(&slot_field(DATE_STRING, slot));
            if label.is_empty() {
                return None;
            }
            Some(DateRange {
                start: timestamp_field(data, &slot_field(START_DATE, slot)),
                end: timestamp_field(data, &slot_field(END_DATE, slot)),
                label: label.to_string(),
                enabled: data.is_checked(&slot_field(ENABLED, slot)),
            })
        })
        .collect();

    TableConfig {
        content: data.text(CONTENT).to_string(),
        fallback: data.text(FALLBACK).to_string(),
        date_ranges,
    }
}

/// Prefill the form from a stored configuration.
///
/// `numranges` never drops below the number of stored ranges.
pub fn form_defaults(config: &TableConfig, submitted: &FormData) -> FormData {
    let num_ranges = submitted.num_ranges().max(config.date_ranges.len());

    let mut data = FormData::new()
        .with(CONTENT, &config.content)
        .with(FALLBACK, &config.fallback)
        .with(NUM_RANGES, num_ranges);

    for (slot, range) in config.date_ranges.iter().enumerate() {
        data.set(slot_field(START_DATE, slot), range.start.to_string());
        data.set(slot_field(END_DATE, slot), range.end.to_string());
        data.set(slot_field(DATE_STRING, slot), range.label.clone());
        data.set(
            slot_field(ENABLED, slot),
            if range.enabled { "1" } else { "0" },
        );
    }

    data
}

fn timestamp_field(data: &FormData, name: &str) -> Timestamp {
    data.int(name).unwrap_or(0)
}
