use super::classifier::ResultClassifier;
use super::extractor::{FactExtractor, Subject};
use crate::hit::SearchHit;
use crate::profile::{
    Bucket, CandidateFactSet, ExcerptRecord, FactCategory, ProfessionalRecord,
    SocialProfileRecord,
};

/// Maximum mentions kept after aggregation.
pub const MENTION_CAP: usize = 5;

/// Characters of a snippet kept in social, article and mention records.
pub const EXCERPT_CHARS: usize = 200;

/// Hits rendered into the list of the bucket they were classified into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketedHits {
    pub social_profiles: Vec<SocialProfileRecord>,
    pub professional_info: Vec<ProfessionalRecord>,
    pub articles: Vec<ExcerptRecord>,
    pub mentions: Vec<ExcerptRecord>,
    /// Mentions seen before the cap was applied.
    pub mentions_seen: usize,
}

impl BucketedHits {
    /// Number of hits that were classified, counting capped mentions.
    #[must_use]
    pub fn classified_count(&self) -> usize {
        self.social_profiles.len()
            + self.professional_info.len()
            + self.articles.len()
            + self.mentions_seen
    }

    fn push(&mut self, bucket: Bucket, hit: &SearchHit) {
        match bucket {
            Bucket::SocialProfile(platform) => self.social_profiles.push(SocialProfileRecord {
                platform,
                title: hit.title.clone(),
                url: hit.url.clone(),
                snippet: hit.excerpt(EXCERPT_CHARS),
            }),
            Bucket::ProfessionalInfo => self.professional_info.push(ProfessionalRecord {
                title: hit.title.clone(),
                url: hit.url.clone(),
                content: hit.snippet.clone(),
            }),
            Bucket::Article => self.articles.push(excerpt(hit)),
            Bucket::Mention => {
                self.mentions_seen += 1;
                self.mentions.push(excerpt(hit));
            }
        }
    }
}

fn excerpt(hit: &SearchHit) -> ExcerptRecord {
    ExcerptRecord {
        title: hit.title.clone(),
        url: hit.url.clone(),
        snippet: hit.excerpt(EXCERPT_CHARS),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub facts: CandidateFactSet,
    pub buckets: BucketedHits,
}

/// Folds a whole hit sequence into one fact set and bucket partition.
#[derive(Debug)]
pub struct Aggregator {
    classifier: ResultClassifier,
    extractor: FactExtractor,
}

impl Aggregator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_parts(ResultClassifier::new(), FactExtractor::new()?))
    }

    #[must_use]
    pub fn with_parts(classifier: ResultClassifier, extractor: FactExtractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    #[must_use]
    pub fn aggregate(&self, hits: &[SearchHit], subject: &Subject) -> Aggregate {
        let mut aggregate = Aggregate::default();

        for hit in hits {
            let bucket = self.classifier.classify(hit);

            if let Some(platform) = bucket.platform() {
                aggregate
                    .facts
                    .insert(FactCategory::SocialMedia, platform.display_name());
            }

            self.extractor
                .extract_into(hit, subject, &mut aggregate.facts);
            aggregate.buckets.push(bucket, hit);
        }

        aggregate.buckets.mentions.truncate(MENTION_CAP);

        tracing::debug!(
            hits = hits.len(),
            social = aggregate.buckets.social_profiles.len(),
            professional = aggregate.buckets.professional_info.len(),
            articles = aggregate.buckets.articles.len(),
            mentions = aggregate.buckets.mentions_seen,
            "Aggregated search hits"
        );

        aggregate
    }
}
