//! Scrape the linked page and extract idea data from its markup.

use crate::core::models::RawIdea;
use crate::core::net;
use crate::{ImportClient, ImportError};
use url::Url;

pub(crate) mod extract;
pub(crate) mod utils;

pub(crate) async fn load_from_scrape(client: &ImportClient, url: &Url) -> Result<RawIdea, ImportError> {
    let doc = net::fetch_document(client, url).await?;

    let raw = extract::extract_idea(&doc.body, client.media_url_re());
    tracing::debug!(
        %url,
        status = doc.status,
        has_title = raw.title.is_some(),
        has_description = raw.description.is_some(),
        has_image = raw.image.is_some(),
        tags = raw.tags.len(),
        "scraped page"
    );

    if raw.title.is_none() && raw.description.is_none() && raw.image.is_none() {
        return Err(ImportError::NoExtractableContent);
    }
    Ok(raw)
}
