//! DOM extraction: Open Graph / Twitter Card meta tags first, then body markup.

use super::utils::{find_media_url, find_tags};
use crate::core::models::RawIdea;
use crate::import::normalize::collapse_whitespace;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_KEYS: &[&str] = &["og:image", "twitter:image"];

/// Run both extraction passes over `html`. Fields stay `None` when nothing usable was found.
pub(crate) fn extract_idea(html: &str, media_url_re: &Regex) -> RawIdea {
    let doc = Html::parse_document(html);

    let title = first_meta(&doc, TITLE_KEYS).or_else(|| first_heading(&doc));
    let description = first_meta(&doc, DESCRIPTION_KEYS).or_else(|| first_paragraph(&doc));
    let image = first_meta(&doc, IMAGE_KEYS).or_else(|| find_media_url(html, media_url_re));

    RawIdea {
        title,
        description,
        image,
        tags: find_tags(html),
    }
}

/// First non-empty `content` across `keys`, in order.
pub(crate) fn first_meta(doc: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| meta_content(doc, key))
}

/// `content` of a meta tag keyed by `property`, or failing that by `name`.
fn meta_content(doc: &Html, key: &str) -> Option<String> {
    ["property", "name"].iter().find_map(|attr| {
        let sel = Selector::parse(&format!(r#"meta[{attr}="{key}"]"#)).ok()?;
        doc.select(&sel)
            .filter_map(|el| el.value().attr("content"))
            .map(collapse_whitespace)
            .find(|c| !c.is_empty())
    })
}

/// Text of the first non-empty `h1`, else `h2`, else `h3`.
pub(crate) fn first_heading(doc: &Html) -> Option<String> {
    ["h1", "h2", "h3"]
        .iter()
        .find_map(|tag| first_text(doc, tag))
}

/// A paragraph classed as a description, else the first paragraph anywhere.
pub(crate) fn first_paragraph(doc: &Html) -> Option<String> {
    first_text(doc, r#"p[class*="description"]"#).or_else(|| first_text(doc, "p"))
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .map(|el| element_text(&el))
        .find(|t| !t.is_empty())
}

/// Text nodes are already entity-decoded by the parser; only whitespace is tidied.
fn element_text(el: &ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}
