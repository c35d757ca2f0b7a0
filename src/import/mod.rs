//! Import orchestration (data API first, then scrape).
//!
//! Internals are split into:
//! - `api`:       direct query against the platform's data API
//! - `scrape`:    HTML fetch + meta/body extraction
//! - `normalize`: cleanup into the final [`ImportResult`]

mod api;
pub(crate) mod normalize;
mod scrape;

use crate::core::models::RawIdea;
use crate::{ImportClient, ImportError, ImportRequest, ImportResult, ImportStrategy, link};
use url::Url;

/// Where an import currently is; reported in tracing events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    Validating,
    Resolving,
    Normalizing,
    Done,
    Failed,
}

/// Resolve the link in `request` into structured idea data.
///
/// Runs the client's [`ImportStrategy`]. Nothing is persisted; the only side
/// effects are outbound requests and updates to the client's config cache.
///
/// # Errors
///
/// Link errors ([`ImportError::InvalidLink`], [`ImportError::MalformedLink`])
/// are returned before any request is made. Otherwise the error of the last
/// strategy attempted is returned.
#[tracing::instrument(skip_all, fields(url = %request.url, strategy = ?client.strategy()))]
pub async fn import_idea(
    client: &ImportClient,
    request: &ImportRequest,
) -> Result<ImportResult, ImportError> {
    let mut stage = ImportStage::Idle;
    let outcome = run(client, request, &mut stage).await;

    match &outcome {
        Ok(_) => tracing::debug!(stage = ?ImportStage::Done, "import finished"),
        Err(e) => tracing::debug!(stage = ?ImportStage::Failed, failed_in = ?stage, error = %e, "import failed"),
    }
    outcome
}

async fn run(
    client: &ImportClient,
    request: &ImportRequest,
    stage: &mut ImportStage,
) -> Result<ImportResult, ImportError> {
    advance(stage, ImportStage::Validating);
    let url = link::validate_link(&request.url, client.domain_markers())?;
    let record_id = if client.strategy().needs_record_id() {
        Some(link::require_record_id(&url)?)
    } else {
        None
    };

    advance(stage, ImportStage::Resolving);
    let raw = resolve(client, &url, record_id.as_deref()).await?;

    advance(stage, ImportStage::Normalizing);
    normalize::normalize(raw)
}

fn advance(stage: &mut ImportStage, next: ImportStage) {
    tracing::debug!(from = ?*stage, to = ?next, "import stage");
    *stage = next;
}

async fn resolve(
    client: &ImportClient,
    url: &Url,
    record_id: Option<&str>,
) -> Result<RawIdea, ImportError> {
    match (client.strategy(), record_id) {
        (ImportStrategy::ScrapeOnly, _) | (_, None) => scrape::load_from_scrape(client, url).await,
        (ImportStrategy::DirectOnly, Some(id)) => load_direct(client, id).await,
        (ImportStrategy::DirectThenScrape, Some(id)) => match load_direct(client, id).await {
            Ok(raw) => Ok(raw),
            Err(e) if should_fall_back(&e) => {
                tracing::warn!(error = %e, "data API path failed, falling back to scrape");
                scrape::load_from_scrape(client, url).await
            }
            Err(e) => Err(e),
        },
    }
}

/// Data-API path with one retry after a rejected query. The rejection has
/// already cleared the cached config, so the retry runs a fresh discovery.
async fn load_direct(client: &ImportClient, record_id: &str) -> Result<RawIdea, ImportError> {
    match api::load_from_data_api(client, record_id).await {
        Err(ImportError::UpstreamQuery { status, .. }) => {
            tracing::debug!(status, "stale platform config; rediscovering and retrying");
            api::load_from_data_api(client, record_id).await
        }
        other => other,
    }
}

/// A missing record is a definitive answer; everything else may still be
/// recoverable from the page markup.
fn should_fall_back(e: &ImportError) -> bool {
    !matches!(
        e,
        ImportError::RecordNotFound { .. }
            | ImportError::InvalidLink(_)
            | ImportError::MalformedLink(_)
    )
}
