use crate::common::{course, render, table, terms, MARCH_2021};
use completion_table::{MemoryStore, TableConfig};
use insta::assert_snapshot;

const NORMAL_ROW: &str = r#"<tr style="color: black; font-style: normal;">"#;
const GREY_ROW: &str = r#"<tr style="color: grey; font-style: normal;">"#;
const RED_ROW: &str = r#"<tr style="color: red; font-style: normal;">"#;
const ITALIC_ROW: &str = r#"<tr style="color: black;font-style: italic;">"#;

#[test]
fn header_cells_use_their_width() {
    let markup = "^10:Name^^10:Score^";
    let html = render(markup, &TableConfig::new(markup), &course(), true);

    assert_snapshot!(html, @r#"<table border="1" style="width: 100%"><tr style="color: black; font-style: normal;"><th style="text-align: center; width: 10%;"><h3>Name</h3></th><th style="text-align: center; width: 10%;"><h3>Score</h3></th></tr></table>"#);
}

#[test]
fn unknown_section_is_red_in_preview_and_dropped_otherwise() {
    let markup = "|Week 1|";
    let store = MemoryStore::new();
    let config = TableConfig::new(markup);

    assert_eq!(
        render(markup, &config, &store, true),
        table(&format!(
            r#"{RED_ROW}<td style="word-wrap: break-word; text-align: left">   Week 1</td></tr>"#
        ))
    );
    assert_eq!(render(markup, &config, &store, false), table(""));
}

#[test]
fn hidden_section_is_italic_in_preview_and_dropped_otherwise() {
    let markup = "| Week 2 | notes |";
    let config = TableConfig::new(markup);

    let preview = render(markup, &config, &course(), true);
    assert!(preview.starts_with(&format!("{}{ITALIC_ROW}", crate::common::TABLE_OPEN)));
    assert!(preview.contains("notes"));

    assert_eq!(render(markup, &config, &course(), false), table(""));
}

#[test]
fn missing_activity_is_an_invalid_id_marker_in_both_modes() {
    let markup = "| Week 1 | {completion:99} |";
    let config = TableConfig::new(markup);

    for preview in [false, true] {
        let html = render(markup, &config, &course(), preview);
        assert!(html.contains(r#"<div style="color: red"> Invalid ID </div>"#));
        assert!(html.contains(NORMAL_ROW), "row style unexpected in {html}");
    }
}

#[test]
fn missing_completion_is_a_grey_dash() {
    let markup = "| Week 1 | {completion:42} |";
    let html = render(markup, &TableConfig::new(markup), &course(), false);

    assert_eq!(
        html,
        table(&format!(
            r#"{GREY_ROW}<td style="word-wrap: break-word; text-align: left">    Week 1</td><td style="word-wrap: break-word; text-align: left">   - </td></tr>"#
        ))
    );
}

#[test]
fn completion_shows_the_matching_range_label() {
    let markup = "| Week 1 | {completion:43} |";
    let mut config = TableConfig::new(markup);
    config.date_ranges = terms();

    let html = render(markup, &config, &course(), false);
    assert!(html.contains(NORMAL_ROW));
    assert!(html.contains("   First half of 2021 </td>"));
}

#[test]
fn completion_outside_ranges_uses_fallback_then_date() {
    let markup = "| Week 1 | {completion:43} |";

    let config = TableConfig::new(markup).with_fallback("Completed");
    assert!(render(markup, &config, &course(), false).contains("   Completed </td>"));

    let config = TableConfig::new(markup);
    let html = render(markup, &config, &course(), false);
    assert!(html.contains("   04/03/21, 05:06 </td>"), "{html}");
}

#[test]
fn preview_hides_completion_state() {
    let markup = "| Week 1 | {completion:43} |";
    let mut config = TableConfig::new(markup);
    config.date_ranges = terms();

    let html = render(markup, &config, &course(), true);
    assert!(html.contains("   - </td>"));
    assert!(!html.contains("First half"));
    assert!(html.contains(NORMAL_ROW));
}

#[test]
fn full_table() {
    let markup = "^:60:Activity ^:40:Completed ^\n#Term 1#\n| Week 1 | {completion:43} |\n| Week 2 | {completion:42} |\n| Week 1 | {completion:42} |";
    let mut config = TableConfig::new(markup);
    config.date_ranges = terms();

    let html = render(markup, &config, &course(), false);
    let rows: Vec<&str> = html
        .trim_start_matches(crate::common::TABLE_OPEN)
        .trim_end_matches(crate::common::TABLE_CLOSE)
        .split('\n')
        .collect();

    assert_eq!(rows.len(), 5);
    assert!(rows[0].contains(r#"width: 60%;"><h3>Activity</h3>"#));
    assert!(rows[0].contains(r#"width: 40%;"><h3>Completed </h3>"#));
    assert!(rows[1].contains(r#"colspan="3" >Term 1</td>"#));
    assert!(rows[2].starts_with(NORMAL_ROW));
    assert!(rows[2].contains("First half of 2021"));
    assert_eq!(rows[3], "");
    assert!(rows[4].starts_with(GREY_ROW));
}

#[test]
fn fixture_completion_lies_in_first_term() {
    assert!(terms()[0].contains(MARCH_2021));
}
