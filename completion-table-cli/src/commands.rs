//! CLI commands
//!
//! Inputs are JSON documents:
//!
//! - element: the stored configuration blob of one completion table
//! - fixture: a [`MemoryStore`] with activities, completions, sections and element → course
//! - form: a submitted authoring form, field name → value
//! - page: `{"width": 210, "leftmargin": 10, "rightmargin": 10}`
//!
//! Each command returns the text to print or a message for stderr.

use completion_table::element::PageDimensions;
use completion_table::{
    resolve_date_range_label, ChronoDateFormatter, CompletionTableElement, CourseId,
    CourseResolver, Element, FormData, MemoryStore, RenderContext, Timestamp, UserRef,
    ValidationErrors,
};
use completion_table_config::CtableConfig;
use serde_json::json;

/// Which course a render happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseTarget {
    Course(CourseId),
    /// Looked up through the fixture's element → course map
    Element(i64),
}

fn load_element(source: &str) -> Result<CompletionTableElement, String> {
    CompletionTableElement::load(source).map_err(|e| e.to_string())
}

fn load_form(source: &str) -> Result<FormData, String> {
    FormData::from_json(source).map_err(|e| format!("Invalid form data: {e}"))
}

fn load_page(source: Option<&str>) -> Result<Option<PageDimensions>, String> {
    source
        .map(|s| serde_json::from_str(s).map_err(|e| format!("Invalid page: {e}")))
        .transpose()
}

/// Render an element for a user.
pub fn render(
    element_source: &str,
    fixture_source: &str,
    user: i64,
    target: CourseTarget,
    preview: bool,
    config: &CtableConfig,
) -> Result<String, String> {
    let element = load_element(element_source)?;
    let store =
        MemoryStore::from_json(fixture_source).map_err(|e| format!("Invalid fixture: {e}"))?;

    let course_id = match target {
        CourseTarget::Course(id) => id,
        CourseTarget::Element(id) => store
            .course_id(id)
            .ok_or_else(|| format!("Element {id} does not belong to any course"))?,
    };
    log::info!("Rendering for user {user} in course {course_id} (preview: {preview})");

    let dates = ChronoDateFormatter::from(&config.dates);
    let ctx = RenderContext::with_store(UserRef::new(user), course_id, &store);
    let html = if preview {
        element.render_preview(&ctx, &dates)
    } else {
        element.render_output(&ctx, &dates)
    };
    Ok(html)
}

/// Resolve the label for `timestamp` against an element's ranges.
pub fn resolve_date(
    element_source: &str,
    timestamp: Option<Timestamp>,
    config: &CtableConfig,
) -> Result<String, String> {
    let element = load_element(element_source)?;
    let table = element.config();
    let dates = ChronoDateFormatter::from(&config.dates);
    Ok(resolve_date_range_label(
        timestamp,
        &table.date_ranges,
        &table.fallback,
        &dates,
    ))
}

/// Validate a submitted form.
pub fn validate(form_source: &str, page_source: Option<&str>) -> Result<ValidationErrors, String> {
    let data = load_form(form_source)?;
    let page = load_page(page_source)?;
    Ok(CompletionTableElement::default().validate(&data, page.as_ref()))
}

/// `field: message` per line.
pub fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}\n"))
        .collect()
}

/// Save a submitted form. Prints `{"data": <blob>, "width": N}`.
pub fn save(form_source: &str, page_source: Option<&str>) -> Result<String, String> {
    let data = load_form(form_source)?;
    let page = load_page(page_source)?;
    let saved = CompletionTableElement::default()
        .save(&data, page.as_ref())
        .map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&saved).map_err(|e| e.to_string())
}

/// Form descriptors, plus the prefilled values when an element is given.
pub fn form(element_source: Option<&str>, config: &CtableConfig) -> Result<String, String> {
    let max_ranges = config.element.max_ranges;
    let element = element_source
        .map(load_element)
        .transpose()?
        .unwrap_or_default();

    let mut out = json!({
        "element": element.name(),
        "title": element.display_name(),
        "fields": element.form_fields(max_ranges),
    });
    if element_source.is_some() {
        let submitted = FormData::new().with("numranges", max_ranges);
        out["defaults"] = json!(element.form_defaults(&submitted));
    }
    serde_json::to_string_pretty(&out).map_err(|e| e.to_string())
}
