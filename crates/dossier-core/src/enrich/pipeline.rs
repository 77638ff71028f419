use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::aggregator::{Aggregate, Aggregator};
use super::assembler::ProfileAssembler;
use super::extractor::Subject;
use crate::config::EngineConfig;
use crate::hit::SearchHit;
use crate::profile::Profile;
use crate::search::{provider_from_config, SearchOutcome, SearchProvider};
use crate::storage::HistorySink;
use crate::summarize::{OpenAiSummarizer, Summarizer};
use crate::Result;

/// Query suffix used when searching for a person.
const PROFILE_QUERY_SUFFIX: &str = "profile information";

/// Longest a history write may hold up a finished profile.
const HISTORY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub profile_results: usize,
    pub web_results: usize,
    pub timeout: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            profile_results: 15,
            web_results: 5,
            timeout: Duration::from_secs(20),
        }
    }
}

/// Drives a lookup end to end: search, classify and extract each hit,
/// aggregate, summarize, assemble.
///
/// Every run builds its own fact set; nothing is shared between runs, so
/// one engine can serve concurrent lookups.
pub struct ProfileEngine {
    search: Arc<dyn SearchProvider>,
    aggregator: Aggregator,
    assembler: ProfileAssembler,
    history: Option<Arc<dyn HistorySink>>,
    limits: SearchLimits,
}

impl ProfileEngine {
    pub fn new(search: Arc<dyn SearchProvider>) -> Result<Self> {
        Ok(Self {
            search,
            aggregator: Aggregator::new()?,
            assembler: ProfileAssembler::new(None, Duration::from_secs(30)),
            history: None,
            limits: SearchLimits::default(),
        })
    }

    /// Builds an engine with the providers selected by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let search = provider_from_config(&config.search)?;

        let summarizer: Option<Arc<dyn Summarizer>> = if config.summarizer.is_configured() {
            match OpenAiSummarizer::from_config(&config.summarizer) {
                Ok(s) => Some(Arc::new(s)),
                Err(e) => {
                    tracing::warn!(error = %e, "Summarizer disabled");
                    None
                }
            }
        } else {
            None
        };

        let limits = SearchLimits {
            profile_results: config.search.profile_results,
            web_results: config.search.web_results,
            timeout: Duration::from_secs(u64::from(config.search.timeout_seconds)),
        };

        Ok(Self::new(search)?
            .with_summarizer(
                summarizer,
                Duration::from_secs(u64::from(config.summarizer.timeout_seconds)),
            )
            .with_limits(limits))
    }

    #[must_use]
    pub fn with_summarizer(
        mut self,
        summarizer: Option<Arc<dyn Summarizer>>,
        timeout: Duration,
    ) -> Self {
        self.assembler = ProfileAssembler::new(summarizer, timeout);
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn HistorySink>) -> Self {
        self.history = Some(history);
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn search_provider(&self) -> &str {
        self.search.name()
    }

    #[must_use]
    pub fn has_summarizer(&self) -> bool {
        self.assembler.has_summarizer()
    }

    /// Builds a profile for `name`. Search or summarizer failures degrade
    /// the result instead of failing the call.
    pub async fn build_profile(&self, name: &str) -> Profile {
        let subject = Subject::new(name);
        let query = format!("{} {PROFILE_QUERY_SUFFIX}", subject.name());

        tracing::info!(name = subject.name(), "Building profile");

        let hits = self
            .run_search(&query, self.limits.profile_results)
            .await;
        let aggregate = self.aggregate(&hits, &subject);
        let profile = self.assembler.assemble(&subject, aggregate).await;

        tracing::info!(
            name = subject.name(),
            hits = hits.len(),
            records = profile.record_count(),
            "Profile built"
        );

        self.record(&subject, &profile).await;
        profile
    }

    /// Classification and extraction over already fetched hits.
    #[must_use]
    pub fn aggregate(&self, hits: &[SearchHit], subject: &Subject) -> Aggregate {
        self.aggregator.aggregate(hits, subject)
    }

    /// Plain web search, empty when the provider is unavailable.
    pub async fn web_search(&self, query: &str) -> Vec<SearchHit> {
        self.run_search(query, self.limits.web_results).await
    }

    async fn run_search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let outcome =
            match tokio::time::timeout(self.limits.timeout, self.search.search(query, limit)).await
            {
                Ok(outcome) => outcome,
                Err(_) => SearchOutcome::Unavailable(format!(
                    "timed out after {}s",
                    self.limits.timeout.as_secs()
                )),
            };

        match outcome {
            SearchOutcome::Hits(mut hits) => {
                hits.truncate(limit);
                hits
            }
            SearchOutcome::Unavailable(reason) => {
                tracing::warn!(
                    provider = self.search.name(),
                    query,
                    %reason,
                    "Search unavailable, continuing with no results"
                );
                Vec::new()
            }
        }
    }

    async fn record(&self, subject: &Subject, profile: &Profile) {
        let Some(history) = &self.history else {
            return;
        };

        let query = format!("Person: {}", subject.name());
        match tokio::time::timeout(HISTORY_TIMEOUT, history.record(&query, profile, Utc::now())).await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to record profile lookup"),
            Err(_) => tracing::warn!(
                timeout_secs = HISTORY_TIMEOUT.as_secs(),
                "Recording profile lookup timed out"
            ),
        }
    }
}
