use regex::Regex;

use crate::profile::FactCategory;

pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

/// Deliberately loose: optional country code, optional area code, then up to
/// three digit groups separated by space, hyphen or dot.
pub const PHONE_PATTERN: &str =
    r"\b(\+\d{1,3}[-.\s]?)?(\(?\d{1,4}\)?[-.\s]?)?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}\b";

pub const LOCATION_INDICATORS: &[&str] = &[
    "located in",
    "lives in",
    "based in",
    "from",
    "city of",
    "resident of",
];

pub const OCCUPATION_INDICATORS: &[&str] = &[
    "works as",
    "is a",
    "professional",
    "occupation",
    "job",
    "career",
    "position",
];

pub const EDUCATION_INDICATORS: &[&str] = &[
    "studied at",
    "graduated from",
    "alumni",
    "university",
    "college",
    "school",
    "degree",
];

/// How candidate text following an indicator phrase is cut and cleaned.
#[derive(Debug)]
pub struct IndicatorRule {
    pub category: FactCategory,
    pub phrases: &'static [&'static str],
    /// Characters taken after the phrase before splitting into words.
    pub window_chars: usize,
    pub max_words: usize,
    cleanup: Regex,
}

impl IndicatorRule {
    pub fn new(
        category: FactCategory,
        phrases: &'static [&'static str],
        window_chars: usize,
        max_words: usize,
        keep_commas: bool,
    ) -> Result<Self, regex::Error> {
        let cleanup = if keep_commas {
            Regex::new(r"[^\w\s,]")?
        } else {
            Regex::new(r"[^\w\s]")?
        };

        Ok(Self {
            category,
            phrases,
            window_chars,
            max_words,
            cleanup,
        })
    }

    /// Cuts the window that follows an indicator into at most `max_words`
    /// words and strips disallowed characters.
    #[must_use]
    pub fn shape(&self, following: &str) -> String {
        let window: String = following.chars().take(self.window_chars).collect();
        let words: Vec<&str> = window.split_whitespace().take(self.max_words).collect();
        let joined = words.join(" ");
        self.cleanup.replace_all(&joined, "").trim().to_string()
    }

    /// A shaped candidate must be longer than two characters.
    #[must_use]
    pub fn accepts(candidate: &str) -> bool {
        candidate.chars().count() > 2
    }
}

/// Fixed regular expressions and indicator phrases used by the extractor.
#[derive(Debug)]
pub struct PatternLibrary {
    pub email: Regex,
    pub phone: Regex,
    pub location: IndicatorRule,
    pub occupation: IndicatorRule,
    pub education: IndicatorRule,
}

impl PatternLibrary {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            location: IndicatorRule::new(
                FactCategory::Location,
                LOCATION_INDICATORS,
                30,
                3,
                true,
            )?,
            occupation: IndicatorRule::new(
                FactCategory::Occupation,
                OCCUPATION_INDICATORS,
                30,
                4,
                false,
            )?,
            education: IndicatorRule::new(
                FactCategory::Education,
                EDUCATION_INDICATORS,
                40,
                5,
                false,
            )?,
        })
    }

    #[must_use]
    pub fn indicator_rules(&self) -> [&IndicatorRule; 3] {
        [&self.location, &self.occupation, &self.education]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        let library = PatternLibrary::compile().unwrap();
        assert_eq!(library.indicator_rules().len(), 3);
    }

    #[test]
    fn test_email_pattern() {
        let library = PatternLibrary::compile().unwrap();
        let found: Vec<&str> = library
            .email
            .find_iter("write to jane.doe@example.com or ops@corp.io today")
            .map(|m| m.as_str())
            .collect();

        assert_eq!(found, ["jane.doe@example.com", "ops@corp.io"]);
    }

    #[test]
    fn test_phone_pattern_is_permissive() {
        let library = PatternLibrary::compile().unwrap();

        assert!(library.phone.is_match("call +1 555-123-4567"));
        assert!(library.phone.is_match("founded in 2019"));
        assert!(!library.phone.is_match("no digits here"));
    }

    #[test]
    fn test_location_shape_keeps_commas_and_three_words() {
        let library = PatternLibrary::compile().unwrap();

        let shaped = library.location.shape(" Austin, Texas (USA) and beyond");
        assert_eq!(shaped, "Austin, Texas USA");
    }

    #[test]
    fn test_occupation_shape_strips_commas() {
        let library = PatternLibrary::compile().unwrap();

        let shaped = library.occupation.shape(" a writer, editor & critic today");
        assert_eq!(shaped, "a writer editor");
    }

    #[test]
    fn test_shape_respects_character_window() {
        let library = PatternLibrary::compile().unwrap();

        let shaped = library
            .education
            .shape(" the massachusetts institute of technology in cambridge");
        assert_eq!(shaped, "the massachusetts institute of technolo");
    }

    #[test]
    fn test_accepts_requires_three_characters() {
        assert!(!IndicatorRule::accepts(""));
        assert!(!IndicatorRule::accepts("ny"));
        assert!(IndicatorRule::accepts("nyc"));
    }
}
