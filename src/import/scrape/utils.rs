//! Raw-HTML scans used where the DOM carries no structured hint.

use crate::import::normalize::clean_html;
use regex::Regex;
use std::sync::LazyLock;

/// Inner text of an element whose opening tag mentions a category, tag or topic.
static TAG_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<[a-z][^>]*(?:category|tag|topic)[^>]*>([^<]+)<")
        .expect("static tag text regex")
});

/// Longest fragment (in chars, exclusive) accepted as a tag.
const MAX_TAG_CHARS: usize = 50;

/// First storage-bucket media URL anywhere in the raw HTML.
pub(crate) fn find_media_url(html: &str, media_url_re: &Regex) -> Option<String> {
    media_url_re.find(html).map(|m| m.as_str().to_string())
}

/// Short text fragments next to category/tag/topic markup, in document order.
/// Duplicates are kept.
pub(crate) fn find_tags(html: &str) -> Vec<String> {
    TAG_TEXT_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| clean_html(m.as_str()))
        .filter(|t| !t.is_empty() && t.chars().count() < MAX_TAG_CHARS)
        .collect()
}
