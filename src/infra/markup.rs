//! Plain-text extraction from editor markup.
//!
//! Note content is opaque markup; the only thing the core does with it is
//! pull out the text for search and analysis.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    // last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

/// Strips tags, decodes common entities and collapses whitespace.
///
/// Tags are replaced by a space so that `<p>a</p><p>b</p>` yields `a b`.
///
/// # Examples
///
/// ```
/// use notekeep::infra::plain_text;
///
/// assert_eq!(plain_text("<p>Hello&nbsp;<b>world</b></p>"), "Hello world");
/// ```
pub fn plain_text(markup: &str) -> String {
    let mut text = TAG_RE.replace_all(markup, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    SPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// First `max_chars` characters of the plain text, with an ellipsis when cut.
pub fn preview(markup: &str, max_chars: usize) -> String {
    let text = plain_text(markup);
    if text.chars().count() <= max_chars {
        text
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
