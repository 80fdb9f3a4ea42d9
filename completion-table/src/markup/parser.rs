//! Markup parsing: escaping normalization and line classification.

use super::line::{Fragment, Line, Section, SectionStatus};
use crate::lookup::SectionLookup;
use crate::model::CourseId;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static HEADER_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r".\^:").expect("valid regex"));
static SECTION_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".\|[^\r\n]").expect("valid regex"));

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\^.+?\^").expect("valid regex"));
static GROUP_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#.+?#").expect("valid regex"));
static SECTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|(.+?)\|").expect("valid regex"));

static HEADER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^:?(\d+):(.+?)\^").expect("valid regex"));
static GROUP_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(.+?)#").expect("valid regex"));
static SECTION_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|(.+?)\|").expect("valid regex"));

/// Double the single separators authors write between cells.
///
/// Any character followed by `^:` becomes `^^:`, and a `|` between two characters on the same
/// line becomes `||`. The surrounding character(s) are consumed, so `^:10:A ^:10:B ^` turns into
/// `^:10:A^^:10:B ^` and `| Week 1 | x |` into `| Week 1||x |`.
pub fn normalize_escapes(text: &str) -> String {
    let text = HEADER_SEPARATOR.replace_all(text, NoExpand("^^:"));
    SECTION_SEPARATOR
        .replace_all(&text, NoExpand("||"))
        .into_owned()
}

/// Normalize `text` and classify every line.
///
/// Section lines are checked against the course: their status is settled here, one lookup per
/// line. Lines are split on `\n` only, so a trailing `\r` stays part of the line.
pub fn parse(text: &str, course_id: CourseId, sections: &dyn SectionLookup) -> Vec<Line> {
    normalize_escapes(text)
        .split('\n')
        .map(|line| classify_line(line, course_id, sections))
        .collect()
}

fn classify_line(line: &str, course_id: CourseId, sections: &dyn SectionLookup) -> Line {
    if HEADER_LINE.is_match(line) {
        return Line::Header(header_fragments(line));
    }

    if GROUP_LINE.is_match(line) {
        return Line::Group(split_cells(line, &GROUP_CELL, Fragment::GroupCell));
    }

    if let Some(caps) = SECTION_LINE.captures(line) {
        let label = caps[1].trim().to_string();
        let status = section_status(course_id, &label, sections);
        log::debug!("section '{label}' in course {course_id}: {status:?}");
        return Line::Section(Section {
            label,
            fragments: split_cells(line, &SECTION_CELL, Fragment::SectionCell),
            status,
            completion: None,
        });
    }

    Line::Plain(line.to_string())
}

/// Visibility of the section named `label`. With several matches the last one decides.
fn section_status(course_id: CourseId, label: &str, sections: &dyn SectionLookup) -> SectionStatus {
    match sections.sections(course_id, label) {
        Ok(records) => match records.last() {
            None => SectionStatus::Invalid,
            Some(record) if record.visible => SectionStatus::Visible,
            Some(_) => SectionStatus::Hidden,
        },
        Err(err) => {
            log::warn!("Section lookup for '{label}' in course {course_id} failed: {err}");
            SectionStatus::Invalid
        }
    }
}

fn header_fragments(line: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in HEADER_CELL.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        push_raw(&mut fragments, &line[last..whole.start()]);
        match caps[1].parse::<u32>() {
            Ok(width) => fragments.push(Fragment::HeaderCell {
                width,
                text: caps[2].to_string(),
            }),
            Err(_) => push_raw(&mut fragments, whole.as_str()),
        }
        last = whole.end();
    }

    push_raw(&mut fragments, &line[last..]);
    fragments
}

fn split_cells(line: &str, cell: &Regex, make: fn(String) -> Fragment) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in cell.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        push_raw(&mut fragments, &line[last..whole.start()]);
        fragments.push(make(caps[1].to_string()));
        last = whole.end();
    }

    push_raw(&mut fragments, &line[last..]);
    fragments
}

fn push_raw(fragments: &mut Vec<Fragment>, text: &str) {
    if !text.is_empty() {
        fragments.push(Fragment::Raw(text.to_string()));
    }
}
