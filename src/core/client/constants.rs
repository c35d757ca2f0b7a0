//! Centralized constants for default endpoints, patterns and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Accept header sent with every page and bundle fetch.
pub(crate) const HTML_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Platform root page; its HTML references the main client bundle.
pub(crate) const DEFAULT_PLATFORM_ROOT: &str = "https://www.idestrim.site/";

/// Hosts accepted as links to the platform (subdomains included).
pub(crate) const DEFAULT_DOMAIN_MARKERS: &[&str] = &["idestrim.site", "idestrim.com"];

/// Hosting provider's project URL as it appears inside the bundle.
pub(crate) const DEFAULT_API_HOST_PATTERN: &str = r"https://[a-z]+\.supabase\.co";

/// Public storage bucket holding idea media.
pub(crate) const DEFAULT_MEDIA_BUCKET: &str = "media";

/// Table listing published ideas on the platform's data API.
pub(crate) const RECORD_TABLE_PATH: &str = "rest/v1/media_uploads";

/// Per-request timeout applied to every outbound call.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
