//! Cleanup of extracted fields into the final [`ImportResult`].

use crate::core::models::RawIdea;
use crate::{ImportError, ImportResult};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static markup regex"));

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static ws regex"));

/// Strip markup, decode the common entities, collapse whitespace and trim.
///
/// `&amp;` is decoded last so that `&amp;lt;` becomes `&lt;`, not `<`.
pub fn clean_html(s: &str) -> String {
    let stripped = TAG_RE.replace_all(s, "");
    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&decoded)
}

/// Collapse whitespace runs into single spaces and trim. Used for text that is
/// already plain, such as DOM text nodes and attribute values.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

/// Assemble the final result from plain-text fields.
///
/// Strategies hand over text with markup already removed; only whitespace is
/// tidied here, so literal `<` or `&` in a title survive.
pub(crate) fn normalize(raw: RawIdea) -> Result<ImportResult, ImportError> {
    let result = ImportResult {
        title: raw.title.as_deref().map(collapse_whitespace).unwrap_or_default(),
        description: raw
            .description
            .as_deref()
            .map(collapse_whitespace)
            .unwrap_or_default(),
        image: raw
            .image
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        tags: raw
            .tags
            .iter()
            .map(|t| collapse_whitespace(t))
            .filter(|t| !t.is_empty())
            .collect(),
    };

    if result.is_empty() {
        return Err(ImportError::NoExtractableContent);
    }
    Ok(result)
}
