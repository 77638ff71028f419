//! Search providers that turn a query into raw hits.
//!
//! Providers never hand errors to the engine: transport or parse failures
//! come back as [`SearchOutcome::Unavailable`], which the engine treats as
//! an empty result set.

mod client;
mod duckduckgo;
mod serper;

pub use client::build_http_client;
pub use duckduckgo::DuckDuckGoSearch;
pub use serper::SerperSearch;

use std::sync::Arc;

use crate::config::{SearchBackend, SearchConfig};
use crate::hit::SearchHit;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Search provider returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Could not parse search response: {0}")]
    Parse(String),
    #[error("Search provider requires an API key")]
    MissingApiKey,
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Hits(Vec<SearchHit>),
    Unavailable(String),
}

impl SearchOutcome {
    /// Hits, or nothing when the provider was unavailable.
    #[must_use]
    pub fn into_hits(self) -> Vec<SearchHit> {
        match self {
            Self::Hits(hits) => hits,
            Self::Unavailable(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Hits(_))
    }
}

impl From<SearchResult<Vec<SearchHit>>> for SearchOutcome {
    fn from(result: SearchResult<Vec<SearchHit>>) -> Self {
        match result {
            Ok(hits) => Self::Hits(hits),
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns at most `limit` hits in provider order.
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome;
}

/// Builds the provider selected by `config`.
pub fn provider_from_config(config: &SearchConfig) -> SearchResult<Arc<dyn SearchProvider>> {
    let http = build_http_client(config)?;

    let provider: Arc<dyn SearchProvider> = match config.backend {
        SearchBackend::DuckDuckGo => Arc::new(DuckDuckGoSearch::new(http)),
        SearchBackend::Serper => {
            let key = config
                .serper_api_key
                .clone()
                .ok_or(SearchError::MissingApiKey)?;
            Arc::new(SerperSearch::new(http, key))
        }
    };

    Ok(provider)
}
