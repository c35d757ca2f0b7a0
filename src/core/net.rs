use crate::core::client::HTML_ACCEPT;
use crate::core::{ImportClient, ImportError};
use reqwest::header::ACCEPT;
use url::Url;

/// A fetched document: HTTP status and body text.
#[derive(Debug, Clone)]
pub(crate) struct FetchedDocument {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// GET `url` as a browser would and return the body.
///
/// Transport failures (including the client timeout) surface as
/// [`ImportError::Http`], non-2xx statuses as [`ImportError::Status`].
/// Retrying is left to the caller.
pub(crate) async fn fetch_document(
    client: &ImportClient,
    url: &Url,
) -> Result<FetchedDocument, ImportError> {
    let resp = client
        .http()
        .get(url.clone())
        .header(ACCEPT, HTML_ACCEPT)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ImportError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    tracing::debug!(%url, status = status.as_u16(), len = body.len(), "fetched document");

    Ok(FetchedDocument {
        status: status.as_u16(),
        body,
    })
}
