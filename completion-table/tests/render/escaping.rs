use crate::common::{course, render, table};
use completion_table::{DateRange, TableConfig};

#[test]
fn literal_header_marker_is_not_a_cell() {
    let markup = "a^: text ^";
    let html = render(markup, &TableConfig::new(markup), &course(), false);

    assert!(!html.contains("<th"));
    assert_eq!(
        html,
        table(r#"<tr style="color: black; font-style: normal;">^^: text ^</tr>"#)
    );
}

#[test]
fn label_with_pipes_does_not_add_cells() {
    let markup = "| Week 1 | {completion:43} |";
    let config = TableConfig::new(markup)
        .with_range(DateRange::new(0, i64::MAX, "Done | really | done"));

    let html = render(markup, &config, &course(), false);
    assert_eq!(html.matches("<td").count(), 2);
    assert!(html.contains("Done | really | done"));
}

#[test]
fn label_with_header_markers_stays_text() {
    let markup = "Status: {completion:43}";
    let config = TableConfig::new(markup)
        .with_range(DateRange::new(0, i64::MAX, "^:10:fake^"));

    let html = render(markup, &config, &course(), false);
    assert_eq!(html, table("Status: ^:10:fake^"));
}

#[test]
fn plain_lines_pass_through() {
    let markup = "<p>Intro</p>\n\n| Week 1 | x |";
    let html = render(markup, &TableConfig::new(markup), &course(), false);
    assert!(html.starts_with(&format!("{}<p>Intro</p>\n\n", crate::common::TABLE_OPEN)));
}
