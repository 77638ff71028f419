use serde::{Deserialize, Serialize};

/// Social platforms recognised by the classifier, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Linkedin,
    Github,
    Twitter,
    Facebook,
    Instagram,
}

impl Platform {
    pub const ALL: [Self; 5] = [
        Self::Linkedin,
        Self::Github,
        Self::Twitter,
        Self::Facebook,
        Self::Instagram,
    ];

    /// Lower-case keyword looked for in titles and URLs.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }

    /// The keyword with its first letter capitalised.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Linkedin => "Linkedin",
            Self::Github => "Github",
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classification assigned to exactly one search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    SocialProfile(Platform),
    ProfessionalInfo,
    Article,
    Mention,
}

impl Bucket {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SocialProfile(_) => "social_profile",
            Self::ProfessionalInfo => "professional_info",
            Self::Article => "article",
            Self::Mention => "mention",
        }
    }

    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::SocialProfile(p) => Some(*p),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCategory {
    Location,
    Occupation,
    Education,
    SocialMedia,
    Email,
    Website,
    Phone,
}

impl FactCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Occupation => "occupation",
            Self::Education => "education",
            Self::SocialMedia => "social_media",
            Self::Email => "email",
            Self::Website => "website",
            Self::Phone => "phone",
        }
    }
}

/// Insertion-ordered list of distinct strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistinctList(Vec<String>);

impl DistinctList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` unless an equal string is already present.
    /// Returns whether the value was added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a DistinctList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Candidate facts accumulated across every hit of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFactSet {
    pub possible_locations: DistinctList,
    pub possible_occupations: DistinctList,
    pub possible_education: DistinctList,
    pub possible_social_media: DistinctList,
    pub possible_emails: DistinctList,
    pub possible_websites: DistinctList,
    pub possible_phone_numbers: DistinctList,
}

impl CandidateFactSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, category: FactCategory) -> &DistinctList {
        match category {
            FactCategory::Location => &self.possible_locations,
            FactCategory::Occupation => &self.possible_occupations,
            FactCategory::Education => &self.possible_education,
            FactCategory::SocialMedia => &self.possible_social_media,
            FactCategory::Email => &self.possible_emails,
            FactCategory::Website => &self.possible_websites,
            FactCategory::Phone => &self.possible_phone_numbers,
        }
    }

    fn get_mut(&mut self, category: FactCategory) -> &mut DistinctList {
        match category {
            FactCategory::Location => &mut self.possible_locations,
            FactCategory::Occupation => &mut self.possible_occupations,
            FactCategory::Education => &mut self.possible_education,
            FactCategory::SocialMedia => &mut self.possible_social_media,
            FactCategory::Email => &mut self.possible_emails,
            FactCategory::Website => &mut self.possible_websites,
            FactCategory::Phone => &mut self.possible_phone_numbers,
        }
    }

    pub fn insert(&mut self, category: FactCategory, value: impl Into<String>) -> bool {
        self.get_mut(category).insert(value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.possible_locations.is_empty()
            && self.possible_occupations.is_empty()
            && self.possible_education.is_empty()
            && self.possible_social_media.is_empty()
            && self.possible_emails.is_empty()
            && self.possible_websites.is_empty()
            && self.possible_phone_numbers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfileRecord {
    pub platform: Platform,
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Title, URL and snippet excerpt of an article or mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptRecord {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Short previews for human-facing delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePreview {
    pub professional_info: Vec<ProfessionalRecord>,
    pub articles: Vec<ExcerptRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(flatten)]
    pub facts: CandidateFactSet,
    pub summary: String,
    pub social_profiles: Vec<SocialProfileRecord>,
    pub professional_info: Vec<ProfessionalRecord>,
    pub articles: Vec<ExcerptRecord>,
    pub mentions: Vec<ExcerptRecord>,
    pub preview: ProfilePreview,
}

impl Profile {
    /// Number of bucketed records carried by the profile.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.social_profiles.len()
            + self.professional_info.len()
            + self.articles.len()
            + self.mentions.len()
    }
}
