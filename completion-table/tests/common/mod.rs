//! Shared fixtures: a small course with sections, activities and one user's completions.

use completion_table::{
    ChronoDateFormatter, DateRange, DateRangeResolver, MemoryStore, RenderContext, TableConfig,
    UserRef,
};

pub const COURSE: i64 = 3;
pub const USER: i64 = 7;

/// 2021-03-04 05:06:00 UTC
pub const MARCH_2021: i64 = 1_614_834_360;

pub const TABLE_OPEN: &str = r#"<table border="1" style="width: 100%">"#;
pub const TABLE_CLOSE: &str = "</table>";

pub fn course() -> MemoryStore {
    MemoryStore::new()
        .with_section(COURSE, "Week 1", true)
        .with_section(COURSE, "Week 2", false)
        .with_activity("42")
        .with_activity("43")
        .with_completion("43", USER, MARCH_2021)
        .with_element(12, COURSE)
}

pub fn terms() -> Vec<DateRange> {
    vec![
        DateRange::new(1_609_459_200, 1_625_097_599, "First half of 2021"),
        DateRange::new(1_625_097_600, 1_640_995_199, "Second half of 2021"),
    ]
}

/// Render `markup` for [`USER`] in [`COURSE`] with the default formatter.
pub fn render(markup: &str, config: &TableConfig, store: &MemoryStore, preview: bool) -> String {
    let formatter = ChronoDateFormatter::default();
    let dates = DateRangeResolver::from_config(config, &formatter);
    let ctx = RenderContext::with_store(UserRef::new(USER), COURSE, store).with_preview(preview);
    completion_table::render_table(markup, &ctx, &dates)
}

pub fn table(body: &str) -> String {
    format!("{TABLE_OPEN}{body}{TABLE_CLOSE}")
}
