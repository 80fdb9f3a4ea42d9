//! Date-range resolver
//!
//! Turns a completion timestamp into the label an author configured for it. Ranges are scanned
//! in stored order and the first enabled range containing the timestamp wins; ranges may
//! overlap and are not required to be sorted. Without a match the fallback string is used, and
//! without a fallback the timestamp itself is formatted.

use crate::model::{DateRange, TableConfig, Timestamp};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt::Write;

/// Returned when there is no timestamp to resolve.
pub const NO_DATE: &str = " ";

/// Short date/time pattern used when none (or an invalid one) is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%y, %H:%M";

/// Host-provided rendering of a timestamp as a short date and time.
pub trait DateFormatter {
    fn format_short_date_time(&self, timestamp: Timestamp) -> String;
}

/// [`DateFormatter`] backed by chrono with a strftime pattern and a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct ChronoDateFormatter {
    pattern: String,
    offset: FixedOffset,
}

impl ChronoDateFormatter {
    /// Create a formatter. An invalid pattern or offset falls back to the defaults.
    pub fn new(pattern: impl Into<String>, utc_offset_minutes: i32) -> Self {
        let mut pattern = pattern.into();
        if !is_valid_pattern(&pattern) {
            log::warn!("Invalid date format '{pattern}', using '{DEFAULT_DATE_FORMAT}'");
            pattern = DEFAULT_DATE_FORMAT.to_string();
        }

        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                log::warn!("Invalid UTC offset {utc_offset_minutes} minutes, using UTC");
                Utc.fix()
            });

        Self { pattern, offset }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, 0)
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format_short_date_time(&self, timestamp: Timestamp) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
            return timestamp.to_string();
        };

        let local = utc.with_timezone(&self.offset);
        let mut out = String::new();
        if write!(out, "{}", local.format(&self.pattern)).is_err() {
            return timestamp.to_string();
        }
        out
    }
}

fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Resolve the display label for `timestamp`.
///
/// A zero timestamp still goes through the ranges and the fallback, it is only never formatted.
/// An enabled match with an empty label behaves like no match at all.
pub fn resolve_date_range_label(
    timestamp: Option<Timestamp>,
    ranges: &[DateRange],
    fallback: &str,
    formatter: &dyn DateFormatter,
) -> String {
    let Some(timestamp) = timestamp else {
        return NO_DATE.to_string();
    };

    let matched = ranges
        .iter()
        .find(|range| range.enabled && range.contains(timestamp));
    if let Some(range) = matched {
        if !range.label.is_empty() {
            return range.label.clone();
        }
    }

    if !fallback.is_empty() {
        return fallback.to_string();
    }

    if timestamp == 0 {
        return NO_DATE.to_string();
    }
    formatter.format_short_date_time(timestamp)
}

/// Resolver bound to one table's ranges, fallback and formatter.
pub struct DateRangeResolver<'a> {
    ranges: &'a [DateRange],
    fallback: &'a str,
    formatter: &'a dyn DateFormatter,
}

impl<'a> DateRangeResolver<'a> {
    pub fn new(ranges: &'a [DateRange], fallback: &'a str, formatter: &'a dyn DateFormatter) -> Self {
        Self {
            ranges,
            fallback,
            formatter,
        }
    }

    pub fn from_config(config: &'a TableConfig, formatter: &'a dyn DateFormatter) -> Self {
        Self::new(&config.date_ranges, &config.fallback, formatter)
    }

    pub fn resolve(&self, timestamp: Option<Timestamp>) -> String {
        resolve_date_range_label(timestamp, self.ranges, self.fallback, self.formatter)
    }
}
