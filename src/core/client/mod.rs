//! Public client surface + builder.
//! Internals are split into `discovery` (bundle scan for the data-API config),
//! `cache` (where that config lives) and `constants` (UA + defaults).

mod cache;
mod constants;
mod discovery;

pub use cache::ConfigCache;

use crate::core::ImportError;
use crate::core::models::{ImportStrategy, PlatformConfig};
use constants::{
    DEFAULT_API_HOST_PATTERN, DEFAULT_DOMAIN_MARKERS, DEFAULT_MEDIA_BUCKET,
    DEFAULT_PLATFORM_ROOT, DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
use regex::Regex;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub(crate) use constants::{HTML_ACCEPT, RECORD_TABLE_PATH};

#[derive(Debug, Clone)]
pub struct ImportClient {
    http: Client,
    platform_root: Url,
    domain_markers: Vec<String>,
    api_host_re: Regex,
    media_url_re: Regex,
    strategy: ImportStrategy,

    config_cache: Arc<ConfigCache>,
}

impl ImportClient {
    /// Create a new builder.
    pub fn builder() -> ImportClientBuilder {
        ImportClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn platform_root(&self) -> &Url {
        &self.platform_root
    }
    pub(crate) fn domain_markers(&self) -> &[String] {
        &self.domain_markers
    }
    pub(crate) fn api_host_re(&self) -> &Regex {
        &self.api_host_re
    }
    pub(crate) fn media_url_re(&self) -> &Regex {
        &self.media_url_re
    }

    /// The resolution strategy this client runs.
    pub fn strategy(&self) -> ImportStrategy {
        self.strategy
    }

    /// The cache holding the discovered data-API config.
    pub fn config_cache(&self) -> &Arc<ConfigCache> {
        &self.config_cache
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct ImportClientBuilder {
    user_agent: Option<String>,
    platform_root: Option<Url>,
    domain_markers: Option<Vec<String>>,
    api_host_pattern: Option<String>,
    media_bucket: Option<String>,
    strategy: Option<ImportStrategy>,
    config_cache: Option<Arc<ConfigCache>>,
    platform_config: Option<PlatformConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ImportClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the platform root page used for bundle discovery
    /// (e.g., `https://www.idestrim.site/`).
    pub fn platform_root(mut self, url: Url) -> Self {
        self.platform_root = Some(url);
        self
    }

    /// Replace the hosts accepted as platform links.
    pub fn domain_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Regex matching the data-API base URL inside the client bundle.
    pub fn api_host_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.api_host_pattern = Some(pattern.into());
        self
    }

    /// Storage bucket searched for media URLs when a page has no image meta tag.
    pub fn media_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.media_bucket = Some(bucket.into());
        self
    }

    /// Choose which resolution path(s) imports use. Default: direct, then scrape.
    pub fn strategy(mut self, strategy: ImportStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Share a config cache between clients.
    pub fn config_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.config_cache = Some(cache);
        self
    }

    /// Seed the cache with a known config, skipping the first discovery.
    pub fn platform_config(mut self, config: PlatformConfig) -> Self {
        self.platform_config = Some(config);
        self
    }

    /// Set a per-request timeout. Default: 10s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<ImportClient, ImportError> {
        let platform_root = match self.platform_root {
            Some(u) => u,
            None => Url::parse(DEFAULT_PLATFORM_ROOT)?,
        };

        let host_pattern = self
            .api_host_pattern
            .unwrap_or_else(|| DEFAULT_API_HOST_PATTERN.to_string());
        let api_host_re = Regex::new(&host_pattern)
            .map_err(|e| ImportError::Data(format!("invalid api host pattern: {e}")))?;

        let bucket = self
            .media_bucket
            .unwrap_or_else(|| DEFAULT_MEDIA_BUCKET.to_string());
        let media_url_re = Regex::new(&format!(
            r#"{host_pattern}/storage/v1/object/public/{}/[^"'\s<>)]+"#,
            regex::escape(&bucket)
        ))
        .map_err(|e| ImportError::Data(format!("invalid media url pattern: {e}")))?;

        let domain_markers = self.domain_markers.unwrap_or_else(|| {
            DEFAULT_DOMAIN_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect()
        });

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            );

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let config_cache = match (self.config_cache, self.platform_config) {
            (Some(cache), Some(cfg)) => {
                if !cache.seed(cfg) {
                    tracing::debug!("shared config cache busy or populated; preset config not applied");
                }
                cache
            }
            (Some(cache), None) => cache,
            (None, Some(cfg)) => Arc::new(ConfigCache::with_config(cfg)),
            (None, None) => Arc::new(ConfigCache::new()),
        };

        Ok(ImportClient {
            http,
            platform_root,
            domain_markers,
            api_host_re,
            media_url_re,
            strategy: self.strategy.unwrap_or_default(),
            config_cache,
        })
    }
}
