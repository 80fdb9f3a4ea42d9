//! Stored configuration blob
//!
//! The host persists each element's configuration as a JSON document:
//!
//! ```text
//! {"content": "...", "fallbackstring": "...", "numranges": 2,
//!  "dateranges": [{"startdate": 0, "enddate": 10, "datestring": "Term 1", "enabled": true}, ...]}
//! ```
//!
//! Field names and the order of `dateranges` are part of the format. `numranges` is always
//! recomputed from the array when encoding.

use crate::error::ElementError;
use crate::model::{DateRange, TableConfig, Timestamp};
use serde::{Deserialize, Serialize};

/// Wire shape of the stored configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub fallbackstring: String,
    #[serde(default)]
    pub numranges: usize,
    #[serde(default)]
    pub dateranges: Vec<StoredRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRange {
    #[serde(default)]
    pub startdate: Timestamp,
    #[serde(default)]
    pub enddate: Timestamp,
    #[serde(default)]
    pub datestring: String,
    #[serde(default)]
    pub enabled: bool,
}

impl From<&TableConfig> for StoredData {
    fn from(config: &TableConfig) -> Self {
        let dateranges: Vec<StoredRange> = config
            .date_ranges
            .iter()
            .map(|range| StoredRange {
                startdate: range.start,
                enddate: range.end,
                datestring: range.label.clone(),
                enabled: range.enabled,
            })
            .collect();

        StoredData {
            content: config.content.clone(),
            fallbackstring: config.fallback.clone(),
            numranges: dateranges.len(),
            dateranges,
        }
    }
}

impl From<StoredData> for TableConfig {
    fn from(data: StoredData) -> Self {
        TableConfig {
            content: data.content,
            fallback: data.fallbackstring,
            date_ranges: data
                .dateranges
                .into_iter()
                .map(|range| DateRange {
                    start: range.startdate,
                    end: range.enddate,
                    label: range.datestring,
                    enabled: range.enabled,
                })
                .collect(),
        }
    }
}

/// Encode a configuration into its stored JSON form.
pub fn encode(config: &TableConfig) -> Result<String, ElementError> {
    serde_json::to_string(&StoredData::from(config)).map_err(ElementError::Encode)
}

/// Decode a stored JSON blob.
pub fn decode(data: &str) -> Result<TableConfig, ElementError> {
    let stored: StoredData = serde_json::from_str(data).map_err(ElementError::Decode)?;
    if stored.numranges != stored.dateranges.len() {
        log::debug!(
            "stored numranges {} disagrees with {} stored ranges",
            stored.numranges,
            stored.dateranges.len()
        );
    }
    Ok(stored.into())
}
