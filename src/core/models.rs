use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of an import call: the link pasted into the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub url: String,
}

impl ImportRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Structured idea data used to pre-fill the submission form.
///
/// Unavailable fields are empty. A successfully returned value always has at
/// least one of `title`, `description` or `image` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
}

impl ImportResult {
    /// True when none of the presentable fields carry data.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_empty()
    }
}

/// JSON envelope returned by the import endpoint.
///
/// `{"success":true,"data":{...}}` on success,
/// `{"success":false,"error":"...","code":"..."}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ImportResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ImportResponse {
    pub fn success(data: ImportResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn failure(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code.into()),
        }
    }

    pub fn from_error(err: &crate::ImportError) -> Self {
        Self::failure(err.user_message(), err.code())
    }
}

/// Backend endpoint and public key of the platform's data API.
///
/// Discovered from the platform's client bundle and only ever kept in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub api_base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Raw field values produced by a resolution strategy, before cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawIdea {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) tags: Vec<String>,
}

/// Which resolution path(s) an import attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Query the data API first, and fall back to scraping the page on failure (default).
    #[default]
    DirectThenScrape,
    /// Only use the data API.
    DirectOnly,
    /// Only scrape the linked page; the link does not need a record id.
    ScrapeOnly,
}

impl ImportStrategy {
    pub(crate) fn needs_record_id(self) -> bool {
        !matches!(self, ImportStrategy::ScrapeOnly)
    }
}

/// An [`ImportStrategy`] name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown import strategy `{0}` (expected direct-then-scrape, direct-only or scrape-only)")]
pub struct ParseStrategyError(pub String);

impl std::str::FromStr for ImportStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct-then-scrape" | "default" => Ok(ImportStrategy::DirectThenScrape),
            "direct-only" | "direct" => Ok(ImportStrategy::DirectOnly),
            "scrape-only" | "scrape" => Ok(ImportStrategy::ScrapeOnly),
            _ => Err(ParseStrategyError(s.trim().to_string())),
        }
    }
}
