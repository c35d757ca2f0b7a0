//! Data-API endpoint & key discovery from the platform's public client bundle.

use crate::core::error::ImportError;
use crate::core::models::PlatformConfig;
use crate::core::net;
use regex::Regex;
use std::sync::LazyLock;

static BUNDLE_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)src="(/assets/[^"]+\.js)""#).expect("static bundle regex")
});

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]{20,}\.eyJ[A-Za-z0-9_-]{20,}\.[A-Za-z0-9_-]{20,}")
        .expect("static api key regex")
});

impl super::ImportClient {
    /// Return the cached config, discovering and caching it first if needed.
    ///
    /// No lock is held across the network calls, so concurrent callers may
    /// each run a discovery; the last one to finish is what stays cached.
    pub(crate) async fn ensure_platform_config(&self) -> Result<PlatformConfig, ImportError> {
        if let Some(cfg) = self.config_cache.get().await {
            return Ok(cfg);
        }

        let cfg = self.discover_platform_config().await?;
        self.config_cache.set(cfg.clone()).await;
        Ok(cfg)
    }

    pub(crate) async fn invalidate_platform_config(&self) {
        tracing::debug!("dropping cached platform config");
        self.config_cache.invalidate().await;
    }

    async fn discover_platform_config(&self) -> Result<PlatformConfig, ImportError> {
        let root = self.platform_root();
        tracing::debug!(%root, "discovering platform config");

        let index = net::fetch_document(self, root)
            .await
            .map_err(|e| ImportError::ConfigDiscovery(format!("root page fetch: {e}")))?;

        let bundle_path = find_bundle_path(&index.body).ok_or_else(|| {
            ImportError::ConfigDiscovery("no /assets/*.js bundle referenced by root page".into())
        })?;
        let bundle_url = root
            .join(bundle_path)
            .map_err(|e| ImportError::ConfigDiscovery(format!("bundle url: {e}")))?;

        let bundle = net::fetch_document(self, &bundle_url)
            .await
            .map_err(|e| ImportError::ConfigDiscovery(format!("bundle fetch: {e}")))?;

        let cfg = extract_platform_config(&bundle.body, self.api_host_re())?;
        tracing::debug!(api_base_url = %cfg.api_base_url, bundle = %bundle_url, "platform config discovered");
        Ok(cfg)
    }
}

/// Path of the main script bundle referenced by the root page, if any.
pub(crate) fn find_bundle_path(html: &str) -> Option<&str> {
    BUNDLE_SRC_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Pull the API base URL and the public key out of bundle source.
pub(crate) fn extract_platform_config(
    js: &str,
    api_host_re: &Regex,
) -> Result<PlatformConfig, ImportError> {
    let api_base_url = api_host_re
        .find(js)
        .map(|m| m.as_str().trim_end_matches('/').to_string())
        .ok_or_else(|| ImportError::ConfigDiscovery("no API base URL in bundle".into()))?;

    let api_key = API_KEY_RE
        .find(js)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ImportError::ConfigDiscovery("no API key in bundle".into()))?;

    Ok(PlatformConfig {
        api_base_url,
        api_key,
    })
}
