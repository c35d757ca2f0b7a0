//! Data-API path: read the idea row straight from the platform's backend.

use crate::core::client::RECORD_TABLE_PATH;
use crate::core::models::RawIdea;
use crate::import::normalize::clean_html;
use crate::{ImportClient, ImportError};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use url::Url;

pub(crate) async fn load_from_data_api(
    client: &ImportClient,
    record_id: &str,
) -> Result<RawIdea, ImportError> {
    let cfg = client.ensure_platform_config().await?;

    let mut url = Url::parse(&format!("{}/", cfg.api_base_url))?.join(RECORD_TABLE_PATH)?;
    url.query_pairs_mut()
        .append_pair("id", &format!("eq.{record_id}"))
        .append_pair("select", "*");

    let sent = client
        .http()
        .get(url.clone())
        .header("apikey", &cfg.api_key)
        .header(AUTHORIZATION, format!("Bearer {}", cfg.api_key))
        .header(ACCEPT, "application/json")
        .send()
        .await;

    let resp = match sent {
        Ok(r) => r,
        Err(e) => {
            client.invalidate_platform_config().await;
            return Err(e.into());
        }
    };

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(
            status = status.as_u16(),
            body = %body.chars().take(200).collect::<String>(),
            "data API rejected query; config may be stale"
        );
        client.invalidate_platform_config().await;
        return Err(ImportError::UpstreamQuery {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let text = resp.text().await?;
    let rows: Vec<ExternalRecord> = serde_json::from_str(&text)
        .map_err(|e| ImportError::Data(format!("data API json parse: {e}")))?;

    let record = rows
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::RecordNotFound {
            id: record_id.to_string(),
        })?;

    Ok(record.into_raw())
}

/* --------- Minimal serde mapping for the platform row --------- */

#[derive(Deserialize, Default)]
#[serde(default)]
struct ExternalRecord {
    title: Option<String>,
    description: Option<String>,
    pitch_summary: Option<String>,
    media_url: Option<String>,
    thumbnail_url: Option<String>,
    category: Option<String>,
}

impl ExternalRecord {
    fn into_raw(self) -> RawIdea {
        // row text may carry markup and entities
        let text = |v: Option<String>| {
            present(v)
                .map(|s| clean_html(&s))
                .filter(|s| !s.is_empty())
        };
        RawIdea {
            title: text(self.title),
            description: text(self.description).or_else(|| text(self.pitch_summary)),
            image: present(self.media_url).or_else(|| present(self.thumbnail_url)),
            tags: text(self.category).into_iter().collect(),
        }
    }
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
