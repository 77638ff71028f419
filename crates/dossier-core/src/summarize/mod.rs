//! Narrative summaries of aggregated profile facts.

mod openai;

pub use openai::OpenAiSummarizer;

use serde::{Deserialize, Serialize};

/// Compact record of what was found, handed to the summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub name: String,
    /// Platform of every social profile record, in hit order
    pub social_profiles: Vec<String>,
    pub possible_occupations: Vec<String>,
    pub possible_locations: Vec<String>,
    pub possible_education: Vec<String>,
    pub articles_count: usize,
    pub mentions_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Summarizer API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Summarizer returned no content")]
    EmptyResponse,
    #[error("Summarizer is not configured")]
    NotConfigured,
    #[error("Could not encode digest: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Written(String),
    Unavailable(String),
}

impl From<Result<String, SummarizeError>> for SummaryOutcome {
    fn from(result: Result<String, SummarizeError>) -> Self {
        match result {
            Ok(text) => Self::Written(text),
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, digest: &Digest) -> SummaryOutcome;
}

/// Deterministic summary used whenever a narrative one cannot be produced.
#[must_use]
pub fn fallback_summary(name: &str) -> String {
    format!(
        "Information gathered about {name} includes possible social profiles, professional details, and online mentions."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sentence() {
        assert_eq!(
            fallback_summary("Jane Doe"),
            "Information gathered about Jane Doe includes possible social profiles, professional details, and online mentions."
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: SummaryOutcome = Ok::<_, SummarizeError>("Jane is an engineer.".to_string()).into();
        assert_eq!(ok, SummaryOutcome::Written("Jane is an engineer.".into()));

        let err: SummaryOutcome = Err(SummarizeError::EmptyResponse).into();
        assert!(matches!(err, SummaryOutcome::Unavailable(_)));
    }

    #[test]
    fn test_digest_field_names() {
        let digest = Digest {
            name: "Jane".into(),
            articles_count: 2,
            ..Default::default()
        };

        let json = serde_json::to_value(&digest).unwrap();

        assert_eq!(json["articles_count"], 2);
        assert_eq!(json["social_profiles"], serde_json::json!([]));
    }
}
