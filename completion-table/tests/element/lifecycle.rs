//! Authoring lifecycle: form → validate → save → load → form defaults → render.

use crate::common::{course, USER};
use completion_table::element::PageDimensions;
use completion_table::form::FieldKind;
use completion_table::{
    ChronoDateFormatter, CompletionTableElement, CourseResolver, Element, FormData, RenderContext,
    UserRef,
};

const A4: PageDimensions = PageDimensions {
    width: 210,
    left_margin: 10,
    right_margin: 10,
};

fn submission() -> FormData {
    FormData::new()
        .with("content", "| Week 1 | {completion:43} |")
        .with("fallbackstring", "Some time")
        .with("numranges", 4)
        .with("width", 0)
        .with("startdate0", 1_609_459_200)
        .with("enddate0", 1_625_097_599)
        .with("datestring0", "Spring")
        .with("enabled0", 1)
        .with("datestring1", "")
        .with("startdate2", 0)
        .with("enddate2", 10)
        .with("datestring2", "Unused")
        .with("enabled2", 0)
        .with("startdate3", 1_625_097_600)
        .with("enddate3", 1_640_995_199)
        .with("datestring3", "Autumn")
        .with("enabled3", 1)
}

#[test]
fn element_reports_its_plugin_name() {
    assert_eq!(
        CompletionTableElement::default().name(),
        "customcertelement_completiontable"
    );
    assert_eq!(CompletionTableElement::default().display_name(), "Completion Table");
}

#[test]
fn form_offers_requested_slots() {
    let fields = CompletionTableElement::default().form_fields(11);
    let groups = fields
        .iter()
        .filter(|f| matches!(f.kind, FieldKind::Group { .. }))
        .count();
    assert_eq!(groups, 11);
    assert_eq!(fields[0].name, "content");
}

#[test]
fn save_load_and_prefill_keep_labelled_slots_in_order() {
    let element = CompletionTableElement::default();
    let data = submission();

    assert!(element.validate(&data, Some(&A4)).is_empty());
    let saved = element.save(&data, Some(&A4)).unwrap();
    assert_eq!(saved.width, 180);

    let stored: serde_json::Value = serde_json::from_str(&saved.data).unwrap();
    assert_eq!(stored["numranges"], 3);

    let loaded = CompletionTableElement::load(&saved.data).unwrap();
    let labels: Vec<_> = loaded
        .config()
        .date_ranges
        .iter()
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Spring", "Unused", "Autumn"]);

    let defaults = loaded.form_defaults(&FormData::new().with("numranges", 2));
    assert_eq!(defaults.num_ranges(), 3);
    assert_eq!(defaults.text("datestring2"), "Autumn");
    assert!(!defaults.is_checked("enabled1"));
    assert_eq!(loaded.stored_data().unwrap(), saved.data);
}

#[test]
fn validation_errors_are_keyed_by_group() {
    let data = submission()
        .with("enddate0", 1_609_459_200)
        .with("datestring3", "")
        .with("width", 500);

    let errors = CompletionTableElement::default().validate(&data, Some(&A4));
    assert_eq!(errors.get("group0"), Some("Date value is invalid"));
    assert_eq!(errors.get("group3"), Some("Date string is invalid"));
    assert!(errors.get("width").is_some());
    assert_eq!(errors.len(), 3);

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json["group0"], "Date value is invalid");
}

#[test]
fn saved_element_renders_for_its_course() {
    let store = course();
    let saved = CompletionTableElement::default()
        .save(&submission(), None)
        .unwrap();
    let element = CompletionTableElement::load(&saved.data).unwrap();
    let course_id = store.course_id(12).unwrap();

    let ctx = RenderContext::with_store(UserRef::new(USER), course_id, &store);
    let dates = ChronoDateFormatter::default();

    let output = element.render_output(&ctx, &dates);
    assert!(output.contains("   Spring </td>"), "{output}");

    let preview = element.render_preview(&ctx, &dates);
    assert!(preview.contains("   - </td>"));
    assert!(!preview.contains("Spring"));
}

#[test]
fn disabled_range_is_skipped_when_rendering() {
    let store = course();
    let data = submission().with("enabled0", 0);
    let saved = CompletionTableElement::default().save(&data, None).unwrap();
    let element = CompletionTableElement::load(&saved.data).unwrap();

    let ctx = RenderContext::with_store(UserRef::new(USER), 3, &store);
    let output = element.render_output(&ctx, &ChronoDateFormatter::default());
    assert!(output.contains("   Some time </td>"));
}
