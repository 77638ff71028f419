use std::sync::Arc;
use std::time::Duration;

use super::aggregator::{Aggregate, MENTION_CAP};
use super::extractor::Subject;
use crate::profile::{Profile, ProfilePreview, ProfessionalRecord};
use crate::summarize::{fallback_summary, Digest, Summarizer, SummaryOutcome};

/// Presentation caps applied when the final profile is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyLimits {
    pub mentions: usize,
    pub professional_preview: usize,
    pub professional_preview_chars: usize,
    pub article_preview: usize,
}

impl Default for AssemblyLimits {
    fn default() -> Self {
        Self {
            mentions: MENTION_CAP,
            professional_preview: 2,
            professional_preview_chars: 150,
            article_preview: 3,
        }
    }
}

/// Combines aggregated facts with a narrative summary into a [`Profile`].
pub struct ProfileAssembler {
    summarizer: Option<Arc<dyn Summarizer>>,
    summary_timeout: Duration,
    limits: AssemblyLimits,
}

impl ProfileAssembler {
    #[must_use]
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>, summary_timeout: Duration) -> Self {
        Self {
            summarizer,
            summary_timeout,
            limits: AssemblyLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: AssemblyLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    #[must_use]
    pub fn digest(subject: &Subject, aggregate: &Aggregate) -> Digest {
        Digest {
            name: subject.name().to_string(),
            social_profiles: aggregate
                .buckets
                .social_profiles
                .iter()
                .map(|p| p.platform.display_name().to_string())
                .collect(),
            possible_occupations: aggregate.facts.possible_occupations.as_slice().to_vec(),
            possible_locations: aggregate.facts.possible_locations.as_slice().to_vec(),
            possible_education: aggregate.facts.possible_education.as_slice().to_vec(),
            articles_count: aggregate.buckets.articles.len(),
            mentions_count: aggregate.buckets.mentions_seen,
        }
    }

    /// Produces the narrative summary, falling back to the fixed sentence
    /// when no summarizer is configured, it fails, or it times out.
    pub async fn summarize(&self, digest: &Digest) -> String {
        let Some(summarizer) = &self.summarizer else {
            return fallback_summary(&digest.name);
        };

        match tokio::time::timeout(self.summary_timeout, summarizer.summarize(digest)).await {
            Ok(SummaryOutcome::Written(text)) if !text.trim().is_empty() => text,
            Ok(SummaryOutcome::Written(_)) => {
                tracing::warn!(name = %digest.name, "Summarizer returned empty text, using fallback");
                fallback_summary(&digest.name)
            }
            Ok(SummaryOutcome::Unavailable(reason)) => {
                tracing::warn!(name = %digest.name, %reason, "Summarizer unavailable, using fallback");
                fallback_summary(&digest.name)
            }
            Err(_) => {
                tracing::warn!(
                    name = %digest.name,
                    timeout_secs = self.summary_timeout.as_secs(),
                    "Summarizer timed out, using fallback"
                );
                fallback_summary(&digest.name)
            }
        }
    }

    pub async fn assemble(&self, subject: &Subject, aggregate: Aggregate) -> Profile {
        let digest = Self::digest(subject, &aggregate);
        let summary = self.summarize(&digest).await;
        self.finish(subject, aggregate, summary)
    }

    /// Builds the profile around an already produced summary.
    #[must_use]
    pub fn finish(&self, subject: &Subject, aggregate: Aggregate, summary: String) -> Profile {
        let Aggregate { facts, buckets } = aggregate;

        let mut mentions = buckets.mentions;
        mentions.truncate(self.limits.mentions);

        let preview = ProfilePreview {
            professional_info: buckets
                .professional_info
                .iter()
                .take(self.limits.professional_preview)
                .map(|r| self.preview_professional(r))
                .collect(),
            articles: buckets
                .articles
                .iter()
                .take(self.limits.article_preview)
                .cloned()
                .collect(),
        };

        Profile {
            name: subject.name().to_string(),
            facts,
            summary,
            social_profiles: buckets.social_profiles,
            professional_info: buckets.professional_info,
            articles: buckets.articles,
            mentions,
            preview,
        }
    }

    fn preview_professional(&self, record: &ProfessionalRecord) -> ProfessionalRecord {
        let max = self.limits.professional_preview_chars;
        let content = if record.content.chars().count() > max {
            let mut cut: String = record.content.chars().take(max).collect();
            cut.push_str("...");
            cut
        } else {
            record.content.clone()
        };

        ProfessionalRecord {
            title: record.title.clone(),
            url: record.url.clone(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::aggregator::Aggregator;
    use crate::hit::SearchHit;

    struct Fixed(SummaryOutcome);

    #[async_trait::async_trait]
    impl Summarizer for Fixed {
        async fn summarize(&self, _digest: &Digest) -> SummaryOutcome {
            self.0.clone()
        }
    }

    struct Stalled;

    #[async_trait::async_trait]
    impl Summarizer for Stalled {
        async fn summarize(&self, _digest: &Digest) -> SummaryOutcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            SummaryOutcome::Written("too late".into())
        }
    }

    fn sample_aggregate(subject: &Subject) -> Aggregate {
        let hits = vec![
            SearchHit::new("Jane - LinkedIn", "Jane works as a product designer", "https://linkedin.com/in/jane"),
            SearchHit::new("About Jane", "a".repeat(300), "https://jane.example/about"),
            SearchHit::new("Jane bio", "short bio", "https://bio.example"),
            SearchHit::new("Speaker profile", "third", "https://conf.example"),
            SearchHit::new("Article by Jane", "essay", "https://mag.example/1"),
            SearchHit::new("Mentioned in news", "news", "https://news.example/1"),
        ];
        Aggregator::new().unwrap().aggregate(&hits, subject)
    }

    fn assembler(summarizer: Option<Arc<dyn Summarizer>>) -> ProfileAssembler {
        ProfileAssembler::new(summarizer, Duration::from_secs(5))
    }

    #[test]
    fn test_digest_contents() {
        let subject = Subject::new("Jane Doe");
        let aggregate = sample_aggregate(&subject);

        let digest = ProfileAssembler::digest(&subject, &aggregate);

        assert_eq!(digest.name, "Jane Doe");
        assert_eq!(digest.social_profiles, vec!["Linkedin".to_string()]);
        assert_eq!(digest.possible_occupations, vec!["a product designer".to_string()]);
        assert_eq!(digest.articles_count, 1);
        assert_eq!(digest.mentions_count, 1);
    }

    #[tokio::test]
    async fn test_summary_from_summarizer() {
        let subject = Subject::new("Jane Doe");
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(Fixed(SummaryOutcome::Written("Jane designs products.".into())));

        let profile = assembler(Some(summarizer))
            .assemble(&subject, sample_aggregate(&subject))
            .await;

        assert_eq!(profile.summary, "Jane designs products.");
    }

    #[tokio::test]
    async fn test_missing_summarizer_uses_fallback() {
        let subject = Subject::new("Jane Doe");

        let profile = assembler(None)
            .assemble(&subject, sample_aggregate(&subject))
            .await;

        assert_eq!(profile.summary, fallback_summary("Jane Doe"));
        assert_eq!(profile.facts.possible_social_media.as_slice(), ["Linkedin"]);
    }

    #[tokio::test]
    async fn test_failed_summarizer_uses_fallback() {
        let subject = Subject::new("Jane Doe");
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(Fixed(SummaryOutcome::Unavailable("502".into())));

        let profile = assembler(Some(summarizer))
            .assemble(&subject, sample_aggregate(&subject))
            .await;

        assert_eq!(profile.summary, fallback_summary("Jane Doe"));
    }

    #[tokio::test]
    async fn test_blank_summary_uses_fallback() {
        let subject = Subject::new("Jane Doe");
        let summarizer: Arc<dyn Summarizer> = Arc::new(Fixed(SummaryOutcome::Written("  ".into())));

        let profile = assembler(Some(summarizer))
            .assemble(&subject, sample_aggregate(&subject))
            .await;

        assert_eq!(profile.summary, fallback_summary("Jane Doe"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_summarizer_times_out_to_fallback() {
        let subject = Subject::new("Jane Doe");
        let aggregate = sample_aggregate(&subject);
        let expected_records = aggregate.buckets.classified_count();

        let profile = ProfileAssembler::new(Some(Arc::new(Stalled)), Duration::from_secs(30))
            .assemble(&subject, aggregate)
            .await;

        assert_eq!(profile.summary, fallback_summary("Jane Doe"));
        assert_eq!(profile.record_count(), expected_records);
    }

    #[test]
    fn test_previews_are_capped() {
        let subject = Subject::new("Jane Doe");
        let profile = assembler(None).finish(&subject, sample_aggregate(&subject), String::new());

        assert_eq!(profile.professional_info.len(), 3);
        assert_eq!(profile.preview.professional_info.len(), 2);
        assert_eq!(profile.preview.professional_info[0].content.chars().count(), 153);
        assert!(profile.preview.professional_info[0].content.ends_with("..."));
        assert_eq!(profile.preview.professional_info[1].content, "short bio");
        assert_eq!(profile.preview.articles.len(), 1);
    }

    #[test]
    fn test_custom_mention_limit() {
        let subject = Subject::new("Jane Doe");
        let limits = AssemblyLimits {
            mentions: 0,
            ..Default::default()
        };

        let profile = assembler(None)
            .with_limits(limits)
            .finish(&subject, sample_aggregate(&subject), String::new());

        assert!(profile.mentions.is_empty());
    }
}
