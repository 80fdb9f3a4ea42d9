//! Markup transformer
//!
//! Pipeline: raw markup → normalized text → [`Line`]s (sections checked against the course)
//! → completion tokens resolved inside the lines → HTML table.
//!
//! # Row Mapping
//!
//! | Line              | Normal mode            | Preview mode          |
//! |-------------------|------------------------|-----------------------|
//! | header / group    | black row              | black row             |
//! | hidden section    | dropped                | italic row            |
//! | invalid section   | dropped                | red row               |
//! | visible, complete | black row              | black row             |
//! | visible, missing  | grey row               | black row             |
//! | plain             | verbatim               | verbatim              |
//!
//! Rendering never fails. Lookup errors are logged and treated as misses.

pub mod line;
pub mod parser;
pub mod resolve;
pub mod serializer;

pub use line::{CompletionMark, Fragment, Line, Section, SectionStatus};

use crate::daterange::DateRangeResolver;
use crate::lookup::{CompletionLookup, SectionLookup};
use crate::model::{CourseId, UserRef};

/// Who and where a table is rendered for, and where host data comes from.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub user: UserRef,
    pub course_id: CourseId,
    pub preview: bool,
    pub completions: &'a dyn CompletionLookup,
    pub sections: &'a dyn SectionLookup,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        user: UserRef,
        course_id: CourseId,
        completions: &'a dyn CompletionLookup,
        sections: &'a dyn SectionLookup,
    ) -> Self {
        Self {
            user,
            course_id,
            preview: false,
            completions,
            sections,
        }
    }

    /// Context whose lookups are both served by `store`.
    pub fn with_store<S>(user: UserRef, course_id: CourseId, store: &'a S) -> Self
    where
        S: CompletionLookup + SectionLookup,
    {
        Self::new(user, course_id, store, store)
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

/// Render `markup` into an HTML table.
pub fn render_table(markup: &str, ctx: &RenderContext<'_>, dates: &DateRangeResolver<'_>) -> String {
    let mut lines = parser::parse(markup, ctx.course_id, ctx.sections);
    resolve::resolve_tokens(&mut lines, ctx, dates);
    serializer::serialize_table(&lines, ctx.preview)
}
