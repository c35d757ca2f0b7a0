//! Recognizing platform links and pulling the idea id out of them.

use crate::core::ImportError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static IDEA_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)/idea/([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})(?:[/?#]|$)",
    )
    .expect("static idea id regex")
});

/// Parse `raw` and check that it points at one of the platform `markers`.
///
/// A marker matches the host exactly or as a parent domain, so
/// `www.idestrim.site` is accepted for `idestrim.site`. A link without a
/// scheme is read as `https://`; any other scheme than http(s) is rejected.
/// Nothing is fetched.
pub fn validate_link(raw: &str, markers: &[String]) -> Result<Url, ImportError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ImportError::InvalidLink("empty link".into()));
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        // pasted without a scheme, e.g. `idestrim.site/idea/<id>`
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{raw}"))
            .map_err(|_| ImportError::InvalidLink(raw.to_string()))?,
        Err(_) => return Err(ImportError::InvalidLink(raw.to_string())),
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ImportError::InvalidLink(raw.to_string()));
    }

    let host = url
        .host_str()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ImportError::InvalidLink(raw.to_string()))?;

    let recognized = markers.iter().any(|m| {
        let m = m.to_ascii_lowercase();
        host == m || host.ends_with(&format!(".{m}"))
    });
    if !recognized {
        return Err(ImportError::InvalidLink(raw.to_string()));
    }

    Ok(url)
}

/// The idea id embedded under an `/idea/` path segment, exactly as written in the link.
pub fn extract_record_id(url: &Url) -> Option<String> {
    IDEA_ID_RE
        .captures(url.path())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Like [`extract_record_id`], but a missing id is a [`ImportError::MalformedLink`].
pub fn require_record_id(url: &Url) -> Result<String, ImportError> {
    extract_record_id(url).ok_or_else(|| ImportError::MalformedLink(url.to_string()))
}
