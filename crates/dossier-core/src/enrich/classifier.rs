use crate::hit::SearchHit;
use crate::profile::{Bucket, Platform};

const PROFESSIONAL_MARKERS: &[&str] = &["profile", "about", "bio"];
const ARTICLE_MARKERS: &[&str] = &["article by", "written by", "author"];

/// Assigns each hit to exactly one bucket. Rules are tried in priority
/// order and the first match wins; matching is case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultClassifier;

impl ResultClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn classify(&self, hit: &SearchHit) -> Bucket {
        let title = hit.title.to_lowercase();
        let url = hit.url.to_lowercase();

        if let Some(platform) = Platform::ALL
            .into_iter()
            .find(|p| title.contains(p.keyword()) || url.contains(p.keyword()))
        {
            return Bucket::SocialProfile(platform);
        }

        if PROFESSIONAL_MARKERS.iter().any(|m| title.contains(m)) {
            return Bucket::ProfessionalInfo;
        }

        if ARTICLE_MARKERS.iter().any(|m| title.contains(m)) {
            return Bucket::Article;
        }

        Bucket::Mention
    }
}
