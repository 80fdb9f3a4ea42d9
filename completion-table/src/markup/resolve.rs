//! Completion token substitution over classified lines.

use super::line::{CompletionMark, Line};
use super::RenderContext;
use crate::daterange::DateRangeResolver;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static COMPLETION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{completion:(.+?)\}").expect("valid regex"));

/// Substituted for tokens naming an activity that does not exist.
pub const INVALID_ACTIVITY: &str = r#"<div style="color: red"> Invalid ID </div>"#;

/// Label of an activity without completion, and of every activity in preview mode.
pub const NOT_COMPLETED: &str = "-";

enum Resolution {
    InvalidActivity,
    Label(String),
}

/// Replace every `{completion:ID}` in `lines` and mark section rows with their completion state.
///
/// Rows are only marked outside preview mode.
pub fn resolve_tokens(lines: &mut [Line], ctx: &RenderContext<'_>, dates: &DateRangeResolver<'_>) {
    for line in lines.iter_mut() {
        match line {
            Line::Plain(text) => {
                substitute(text, ctx, dates);
            }
            Line::Section(section) => {
                for fragment in section.fragments.iter_mut() {
                    let Some(mark) = substitute(fragment.text_mut(), ctx, dates) else {
                        continue;
                    };
                    if !ctx.preview {
                        section.completion = Some(CompletionMark::merge(section.completion, mark));
                    }
                }
            }
            Line::Header(fragments) | Line::Group(fragments) => {
                for fragment in fragments.iter_mut() {
                    substitute(fragment.text_mut(), ctx, dates);
                }
            }
        }
    }
}

/// Substitute the tokens in `text`, returning the combined mark of the valid ones.
fn substitute(
    text: &mut String,
    ctx: &RenderContext<'_>,
    dates: &DateRangeResolver<'_>,
) -> Option<CompletionMark> {
    if !text.contains("{completion:") {
        return None;
    }

    let mut mark = None;
    let replaced = COMPLETION_TOKEN.replace_all(text.as_str(), |caps: &Captures| {
        match resolve_token(&caps[1], ctx, dates) {
            Resolution::InvalidActivity => INVALID_ACTIVITY.to_string(),
            Resolution::Label(label) => {
                let this = if label.trim() == NOT_COMPLETED {
                    CompletionMark::NotCompleted
                } else {
                    CompletionMark::Completed
                };
                mark = Some(CompletionMark::merge(mark, this));
                label
            }
        }
    });
    *text = replaced.into_owned();
    mark
}

fn resolve_token(
    activity_id: &str,
    ctx: &RenderContext<'_>,
    dates: &DateRangeResolver<'_>,
) -> Resolution {
    let exists = ctx
        .completions
        .activity_exists(activity_id)
        .unwrap_or_else(|err| {
            log::warn!("Activity lookup for '{activity_id}' failed: {err}");
            false
        });
    if !exists {
        return Resolution::InvalidActivity;
    }

    if ctx.preview {
        return Resolution::Label(NOT_COMPLETED.to_string());
    }

    let record = ctx
        .completions
        .completion(activity_id, ctx.user.id)
        .unwrap_or_else(|err| {
            log::warn!(
                "Completion lookup for '{activity_id}' and user {} failed: {err}",
                ctx.user.id
            );
            None
        });

    match record {
        Some(record) => Resolution::Label(dates.resolve(Some(record.completed_at))),
        None => Resolution::Label(NOT_COMPLETED.to_string()),
    }
}
