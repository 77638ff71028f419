//! Plain-text rendering of a profile for human readers.

use crate::profile::{FactCategory, Profile};

pub const DISCLAIMER: &str = "Note: This information is automatically gathered from public web sources and may not be 100% accurate.";

const SECTIONS: [(FactCategory, &str); 7] = [
    (FactCategory::Location, "Possible Locations"),
    (FactCategory::Occupation, "Possible Occupations"),
    (FactCategory::Education, "Possible Education"),
    (FactCategory::SocialMedia, "Social Media Presence"),
    (FactCategory::Email, "Possible Email Addresses"),
    (FactCategory::Website, "Possible Websites"),
    (FactCategory::Phone, "Possible Phone Numbers"),
];

/// Renders the profile as a sectioned text report. Empty categories are
/// left out; previews come from [`Profile::preview`].
#[must_use]
pub fn text_report(profile: &Profile) -> String {
    let mut out = format!("Detailed Information about {}:\n\n", profile.name);

    if !profile.summary.is_empty() {
        out.push_str(&format!("Summary:\n{}\n\n", profile.summary));
    }

    for (category, heading) in SECTIONS {
        let values = profile.facts.get(category);
        if values.is_empty() {
            continue;
        }

        out.push_str(heading);
        out.push_str(":\n");
        for value in values {
            out.push_str(&format!("• {value}\n"));
        }
        out.push('\n');
    }

    if !profile.preview.professional_info.is_empty() {
        out.push_str("Professional Information:\n");
        for record in &profile.preview.professional_info {
            out.push_str(&format!("• {}\n  {}\n\n", record.title, record.content));
        }
    }

    if !profile.preview.articles.is_empty() {
        out.push_str("Articles:\n");
        for article in &profile.preview.articles {
            out.push_str(&format!("• {}\n", article.title));
        }
        out.push('\n');
    }

    out.push_str(DISCLAIMER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{ProfileAssembler, Subject};
    use crate::profile::CandidateFactSet;
    use crate::{Aggregator, SearchHit};
    use std::time::Duration;

    fn profile_for(hits: &[SearchHit]) -> Profile {
        let subject = Subject::new("John Smith");
        let aggregate = Aggregator::new().unwrap().aggregate(hits, &subject);
        ProfileAssembler::new(None, Duration::from_secs(1)).finish(
            &subject,
            aggregate,
            "John Smith is a software engineer.".into(),
        )
    }

    #[test]
    fn test_report_sections() {
        let profile = profile_for(&[
            SearchHit::new(
                "John Smith - LinkedIn",
                "John Smith works as a software engineer in Seattle",
                "https://linkedin.com/in/jsmith",
            ),
            SearchHit::new(
                "Article by John Smith",
                "John lives in Seattle",
                "https://blog.example/a",
            ),
        ]);

        let report = text_report(&profile);

        assert!(report.starts_with("Detailed Information about John Smith:\n\n"));
        assert!(report.contains("Summary:\nJohn Smith is a software engineer.\n\n"));
        assert!(report.contains("Possible Occupations:\n• a software engineer in\n"));
        assert!(report.contains("Possible Locations:\n• Seattle\n"));
        assert!(report.contains("Social Media Presence:\n• Linkedin\n"));
        assert!(report.contains("Articles:\n• Article by John Smith\n"));
        assert!(!report.contains("Possible Phone Numbers"));
        assert!(!report.contains("Professional Information"));
        assert!(report.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_empty_profile_is_header_and_disclaimer() {
        let profile = Profile {
            name: "Nobody".into(),
            facts: CandidateFactSet::new(),
            summary: String::new(),
            social_profiles: Vec::new(),
            professional_info: Vec::new(),
            articles: Vec::new(),
            mentions: Vec::new(),
            preview: crate::profile::ProfilePreview::default(),
        };

        assert_eq!(
            text_report(&profile),
            format!("Detailed Information about Nobody:\n\n{DISCLAIMER}")
        );
    }

    #[test]
    fn test_professional_preview_is_truncated() {
        let profile = profile_for(&[SearchHit::new(
            "About John",
            "x".repeat(400),
            "https://john.example/about",
        )]);

        let report = text_report(&profile);

        let expected = format!("Professional Information:\n• About John\n  {}...\n\n", "x".repeat(150));
        assert!(report.contains(&expected));
    }
}
