//! Research document search client
//!
//! Adapter over a managed document-search backend (Discovery Engine style
//! REST API). Hits are normalized to title / first snippet / link and capped
//! at a fixed page size. The client only exists when the backend identity
//! was configured at startup; the service layer answers with an info
//! envelope otherwise, without attempting any network call.

use crate::config::SearchBackendConfig;
use crate::error::{InvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

/// Fixed number of hits requested per query
pub const PAGE_SIZE: usize = 5;

/// One normalized search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Seam over the research document-search backend
///
/// The service layer depends on this trait rather than the concrete client
/// so the envelope policy around search results is testable with stubbed
/// hit lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResearchSearch: Send + Sync {
    /// Run a free-text query; hits arrive in upstream relevance order
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Client for the research document-search backend
#[derive(Debug, Clone)]
pub struct ResearchSearchClient {
    client: Client,
    config: SearchBackendConfig,
}

impl ResearchSearchClient {
    /// Create a client for a configured backend
    pub fn new(config: SearchBackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Regional serving-config endpoint for the configured data store
    fn endpoint(&self) -> String {
        format!(
            "https://{loc}-discoveryengine.googleapis.com/v1beta/projects/{project}/locations/{loc}/dataStores/{store}/servingConfigs/default_search:search",
            loc = self.config.location,
            project = self.config.project_id,
            store = self.config.data_store_id,
        )
    }
}

#[async_trait]
impl ResearchSearch for ResearchSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!(query, "searching research data store");

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&json!({ "query": query, "pageSize": PAGE_SIZE }));

        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(InvestError::SearchError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        Ok(parse_hits(&data))
    }
}

/// Normalize a search response payload into hits
///
/// Only the first snippet of the snippet-bearing field is taken per hit;
/// hits without one get an empty-string snippet rather than a missing field.
pub fn parse_hits(data: &Value) -> Vec<SearchHit> {
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    results
        .iter()
        .take(PAGE_SIZE)
        .map(|result| {
            let doc = &result["document"]["derivedStructData"];

            let snippet = doc
                .get("snippets")
                .and_then(Value::as_array)
                .and_then(|snippets| snippets.first())
                .and_then(|first| first.get("snippet"))
                .and_then(Value::as_str)
                .unwrap_or_default();

            SearchHit {
                title: doc
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("Untitled")
                    .to_string(),
                snippet: snippet.to_string(),
                link: doc
                    .get("link")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }
        })
        .collect()
}
