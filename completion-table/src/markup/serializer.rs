//! HTML serialization (line IR → table markup)
//!
//! Output is a flat string: one `<tr>` per structural line, plain lines verbatim, lines joined
//! with `\n`. Styles are inline because the result is fed to a PDF renderer that ignores
//! stylesheets.

use super::line::{CompletionMark, Fragment, Line, Section, SectionStatus};

pub const TABLE_OPEN: &str = r#"<table border="1" style="width: 100%">"#;
pub const TABLE_CLOSE: &str = "</table>";

const ROW_NORMAL: &str = r#"<tr style="color: black; font-style: normal;">"#;
const ROW_HIDDEN: &str = r#"<tr style="color: black;font-style: italic;">"#;
const ROW_INVALID: &str = r#"<tr style="color: red; font-style: normal;">"#;
const ROW_NOT_COMPLETED: &str = r#"<tr style="color: grey; font-style: normal;">"#;
const ROW_CLOSE: &str = "</tr>";

/// Serialize classified lines into a complete table.
pub fn serialize_table(lines: &[Line], preview: bool) -> String {
    let body = lines
        .iter()
        .map(|line| serialize_line(line, preview))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{TABLE_OPEN}{body}{TABLE_CLOSE}")
}

fn serialize_line(line: &Line, preview: bool) -> String {
    match line {
        Line::Header(fragments) | Line::Group(fragments) => row(ROW_NORMAL, fragments),
        Line::Section(section) => match section_row_style(section, preview) {
            Some(style) => row(style, &section.fragments),
            None => String::new(),
        },
        Line::Plain(text) => text.clone(),
    }
}

/// Row style for a section, `None` when the row is dropped.
fn section_row_style(section: &Section, preview: bool) -> Option<&'static str> {
    match section.status {
        SectionStatus::Hidden if preview => Some(ROW_HIDDEN),
        SectionStatus::Invalid if preview => Some(ROW_INVALID),
        SectionStatus::Hidden | SectionStatus::Invalid => None,
        SectionStatus::Visible => match section.completion {
            Some(CompletionMark::NotCompleted) if !preview => Some(ROW_NOT_COMPLETED),
            _ => Some(ROW_NORMAL),
        },
    }
}

fn row(style: &str, fragments: &[Fragment]) -> String {
    let mut out = String::from(style);
    for fragment in fragments {
        push_fragment(&mut out, fragment);
    }
    out.push_str(ROW_CLOSE);
    out
}

fn push_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::HeaderCell { width, text } => out.push_str(&format!(
            r#"<th style="text-align: center; width: {width}%;"><h3>{text}</h3></th>"#
        )),
        Fragment::GroupCell(text) => out.push_str(&format!(
            r#"<td style="word-wrap: break-word; text-align: center" colspan="3" >{text}</td>"#
        )),
        Fragment::SectionCell(text) => out.push_str(&format!(
            r#"<td style="word-wrap: break-word; text-align: left">   {text}</td>"#
        )),
        Fragment::Raw(text) => out.push_str(text),
    }
}
