//! Typed line representation produced by the parser and consumed by the serializer.

/// One line of table markup after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Header(Vec<Fragment>),
    Group(Vec<Fragment>),
    Section(Section),
    Plain(String),
}

/// A piece of a structural line: a recognised cell, or text kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// `^:W:text^` with W in percent
    HeaderCell { width: u32, text: String },
    /// `#text#`
    GroupCell(String),
    /// `|text|`
    SectionCell(String),
    Raw(String),
}

impl Fragment {
    /// Mutable access to the text carried by the fragment.
    pub fn text_mut(&mut self) -> &mut String {
        match self {
            Fragment::HeaderCell { text, .. } => text,
            Fragment::GroupCell(text) | Fragment::SectionCell(text) | Fragment::Raw(text) => text,
        }
    }
}

/// A `|label|...` line and what the host said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub fragments: Vec<Fragment>,
    pub status: SectionStatus,
    pub completion: Option<CompletionMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Visible,
    Hidden,
    /// No course section carries the label, or the lookup failed.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMark {
    Completed,
    NotCompleted,
}

impl CompletionMark {
    /// Combine the marks of several tokens on one row. Any incomplete activity wins.
    pub fn merge(current: Option<Self>, next: Self) -> Self {
        match (current, next) {
            (Some(CompletionMark::NotCompleted), _) | (_, CompletionMark::NotCompleted) => {
                CompletionMark::NotCompleted
            }
            _ => CompletionMark::Completed,
        }
    }
}
