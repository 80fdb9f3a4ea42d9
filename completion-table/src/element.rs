//! The element as seen by the certificate host.
//!
//! A host drives every element kind through [`Element`]: it builds the settings form, validates
//! and saves submissions, and asks for HTML when a page is rendered or previewed. The stored
//! configuration is the JSON blob from ./blob.rs.

use crate::blob;
use crate::daterange::{DateFormatter, DateRangeResolver};
use crate::error::ElementError;
use crate::form::{self, FormData, FormField};
use crate::markup::{render_table, RenderContext};
use crate::model::TableConfig;
use crate::strings;
use crate::validation::{self, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Space kept free next to the page margins.
const PAGE_GUTTER: i64 = 10;

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: i64,
    #[serde(alias = "leftmargin")]
    pub left_margin: i64,
    #[serde(alias = "rightmargin")]
    pub right_margin: i64,
}

impl PageDimensions {
    /// Widest an element may be on this page.
    pub fn max_element_width(&self) -> i64 {
        self.width - self.left_margin - self.right_margin - PAGE_GUTTER
    }
}

fn max_width(page: Option<&PageDimensions>) -> i64 {
    page.map(PageDimensions::max_element_width).unwrap_or(0)
}

/// Result of saving a submission: what goes in the element's data column and its width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedElement {
    pub data: String,
    pub width: i64,
}

pub trait Element {
    /// Plugin name of the element kind.
    fn name(&self) -> &str;

    /// Human readable name, shown in the host's element list.
    fn display_name(&self) -> &str {
        self.name()
    }

    fn form_fields(&self, max_ranges: usize) -> Vec<FormField>;

    /// Values to prefill the form with, given what the host already put there.
    fn form_defaults(&self, submitted: &FormData) -> FormData;

    fn validate(&self, data: &FormData, page: Option<&PageDimensions>) -> ValidationErrors;

    fn save(
        &self,
        data: &FormData,
        page: Option<&PageDimensions>,
    ) -> Result<SavedElement, ElementError>;

    /// Encoded configuration, as stored by the host.
    fn stored_data(&self) -> Result<String, ElementError>;

    /// HTML for the element. `ctx.preview` selects the preview row rules.
    fn render_output(&self, ctx: &RenderContext<'_>, dates: &dyn DateFormatter) -> String;

    /// HTML for the editor preview.
    fn render_preview(&self, ctx: &RenderContext<'_>, dates: &dyn DateFormatter) -> String {
        self.render_output(&ctx.with_preview(true), dates)
    }
}

/// A completion table and its saved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTableElement {
    config: TableConfig,
}

impl CompletionTableElement {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Element from its stored blob.
    pub fn load(data: &str) -> Result<Self, ElementError> {
        blob::decode(data).map(Self::new)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
}

impl Element for CompletionTableElement {
    fn name(&self) -> &str {
        strings::PLUGIN_NAME
    }

    fn display_name(&self) -> &str {
        strings::ELEMENT_NAME
    }

    fn form_fields(&self, max_ranges: usize) -> Vec<FormField> {
        form::form_fields(max_ranges)
    }

    fn form_defaults(&self, submitted: &FormData) -> FormData {
        form::form_defaults(&self.config, submitted)
    }

    fn validate(&self, data: &FormData, page: Option<&PageDimensions>) -> ValidationErrors {
        validation::validate(data, max_width(page))
    }

    fn save(
        &self,
        data: &FormData,
        page: Option<&PageDimensions>,
    ) -> Result<SavedElement, ElementError> {
        let config = form::config_from_form(data);
        let width = match data.int(form::WIDTH).unwrap_or(0) {
            0 => max_width(page),
            width => width,
        };
        log::debug!(
            "Saving {} with {} date range(s), width {width}",
            self.name(),
            config.date_ranges.len()
        );

        Ok(SavedElement {
            data: blob::encode(&config)?,
            width,
        })
    }

    fn stored_data(&self) -> Result<String, ElementError> {
        blob::encode(&self.config)
    }

    fn render_output(&self, ctx: &RenderContext<'_>, dates: &dyn DateFormatter) -> String {
        let resolver = DateRangeResolver::from_config(&self.config, dates);
        render_table(&self.config.content, ctx, &resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daterange::ChronoDateFormatter;
    use crate::lookup::MemoryStore;
    use crate::model::{DateRange, UserRef};

    const PAGE: PageDimensions = PageDimensions {
        width: 210,
        left_margin: 15,
        right_margin: 15,
    };

    #[test]
    fn max_width_leaves_a_gutter() {
        assert_eq!(PAGE.max_element_width(), 170);
        assert_eq!(max_width(None), 0);
    }

    #[test]
    fn page_accepts_host_field_names() {
        let page: PageDimensions =
            serde_json::from_str(r#"{"width": 297, "leftmargin": 0, "rightmargin": 7}"#).unwrap();
        assert_eq!(page.max_element_width(), 280);
    }

    #[test]
    fn zero_width_becomes_page_maximum() {
        let element = CompletionTableElement::default();
        let data = FormData::new().with("content", "x").with("width", 0);

        let saved = element.save(&data, Some(&PAGE)).unwrap();
        assert_eq!(saved.width, 170);

        let saved = element.save(&data.with("width", 80), Some(&PAGE)).unwrap();
        assert_eq!(saved.width, 80);
    }

    #[test]
    fn saved_blob_loads_back() {
        let data = FormData::new()
            .with("content", "| Week 1 | {completion:5} |")
            .with("fallbackstring", "Later")
            .with("numranges", 2)
            .with("startdate1", 100)
            .with("enddate1", 200)
            .with("datestring1", "Term 1")
            .with("enabled1", 1);

        let saved = CompletionTableElement::default().save(&data, None).unwrap();
        let loaded = CompletionTableElement::load(&saved.data).unwrap();

        assert_eq!(
            loaded.config(),
            &TableConfig::new("| Week 1 | {completion:5} |")
                .with_fallback("Later")
                .with_range(DateRange::new(100, 200, "Term 1"))
        );
    }

    #[test]
    fn load_rejects_garbage() {
        assert!(matches!(
            CompletionTableElement::load("not json"),
            Err(ElementError::Decode(_))
        ));
    }

    #[test]
    fn preview_forces_preview_rules() {
        let store = MemoryStore::new().with_section(1, "Week 1", false);
        let element = CompletionTableElement::new(TableConfig::new("| Week 1 | x |"));
        let ctx = RenderContext::with_store(UserRef::new(7), 1, &store);
        let dates = ChronoDateFormatter::default();

        let output = element.render_output(&ctx, &dates);
        assert!(!output.contains("Week 1"));

        let preview = element.render_preview(&ctx, &dates);
        assert!(preview.contains("font-style: italic;"));
        assert!(preview.contains("Week 1"));
    }
}
