use reqwest::Client;
use serde::Deserialize;

use super::{SearchError, SearchOutcome, SearchProvider, SearchResult};
use crate::hit::SearchHit;

const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";

/// Google results through the Serper API.
pub struct SerperSearch {
    http: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl SerperSearch {
    #[must_use]
    pub fn new(http: Client, api_key: String) -> Self {
        Self {
            http,
            api_key,
            endpoint: SERPER_SEARCH_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    async fn fetch(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        let body = serde_json::json!({
            "q": query,
            "num": limit,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        parse_response(&raw, limit)
    }
}

fn parse_response(raw: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
    let data: SerperResponse =
        serde_json::from_str(raw).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(data
        .organic
        .into_iter()
        .take(limit)
        .map(|r| SearchHit::new(r.title, r.snippet, r.link))
        .collect())
}

#[async_trait::async_trait]
impl SearchProvider for SerperSearch {
    fn name(&self) -> &'static str {
        "serper"
    }

    async fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        tracing::info!(query, limit, "Serper search");

        let result = self.fetch(query, limit).await;
        match &result {
            Ok(hits) => tracing::info!(query, count = hits.len(), "Serper search complete"),
            Err(e) => tracing::warn!(query, error = %e, "Serper search failed"),
        }
        result.into()
    }
}
