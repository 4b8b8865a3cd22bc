//! Elasticsearch `_msearch` client

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::SearchBackend;
use crate::config::BackendSettings;
use crate::error::SearchError;
use crate::model::FileDocument;
use crate::query::FieldQuery;
use crate::results::{ResultSet, SearchHit};

/// HTTP client for an Elasticsearch-compatible backend.
///
/// All per-field queries of one search call travel in a single `_msearch`
/// request; the backend answers with one response per body line, in order.
/// Keyword search across M fields must not cost M network round-trips.
pub struct ElasticBackend {
    client: Client,
    msearch_url: Url,
}

impl ElasticBackend {
    /// Create a client from backend settings.
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .gzip(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        let msearch_url = Url::parse(&format!(
            "{}/{}/_msearch",
            settings.url.trim_end_matches('/'),
            settings.index
        ))?;

        Ok(Self {
            client,
            msearch_url,
        })
    }
}

#[async_trait]
impl SearchBackend for ElasticBackend {
    async fn multi_search(&self, queries: &[FieldQuery]) -> Result<Vec<ResultSet>, SearchError> {
        let body = ndjson_body(queries)?;

        debug!("Sending {} queries in one msearch batch", queries.len());

        let response = self
            .client
            .post(self.msearch_url.clone())
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(SearchError::backend)?
            .error_for_status()
            .map_err(SearchError::backend)?;

        let decoded: MsearchResponse = response.json().await.map_err(SearchError::backend)?;

        decoded
            .responses
            .into_iter()
            .map(MsearchItem::into_result_set)
            .collect()
    }
}

/// Serialize the batch as ND-JSON: one header line and one body line per
/// query. The target index is part of the URL, so headers stay empty.
fn ndjson_body(queries: &[FieldQuery]) -> Result<String, SearchError> {
    let mut body = String::new();
    for query in queries {
        body.push_str("{}\n");
        let line = serde_json::to_string(&query.to_body()).map_err(SearchError::backend)?;
        body.push_str(&line);
        body.push('\n');
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct MsearchResponse {
    responses: Vec<MsearchItem>,
}

#[derive(Debug, Deserialize)]
struct MsearchItem {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    hits: Option<HitsEnvelope>,
}

impl MsearchItem {
    /// A failed item fails the whole batch; there is no partial recovery.
    fn into_result_set(self) -> Result<ResultSet, SearchError> {
        if let Some(error) = self.error {
            return Err(SearchError::backend(anyhow::anyhow!(
                "backend rejected a batched query: {error}"
            )));
        }

        let envelope = self.hits.ok_or_else(|| {
            SearchError::backend(anyhow::anyhow!(
                "batched response is missing its hits envelope"
            ))
        })?;

        Ok(ResultSet {
            total_hits: envelope.total.value,
            hits: envelope
                .hits
                .into_iter()
                .map(|hit| SearchHit {
                    id: hit.id,
                    score: hit.score,
                    document: hit.source,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: TotalHits,
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: FileDocument,
}
