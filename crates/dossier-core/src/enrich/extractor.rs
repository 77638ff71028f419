use super::patterns::{IndicatorRule, PatternLibrary};
use crate::hit::SearchHit;
use crate::profile::{CandidateFactSet, FactCategory};

/// The person a query is about, with the name forms used for relevance checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
    first_token: Option<String>,
    compact: String,
}

impl Subject {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        let lowered = name.to_lowercase();
        let first_token = lowered.split_whitespace().next().map(str::to_string);
        let compact = lowered.replace(' ', "");

        Self {
            name,
            first_token,
            compact,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased first word of the name.
    #[must_use]
    pub fn first_token(&self) -> Option<&str> {
        self.first_token.as_deref()
    }

    /// Lower-cased name with spaces removed.
    #[must_use]
    pub fn compact(&self) -> &str {
        &self.compact
    }
}

/// Lower-cased copy of a text that remembers where each lowered character
/// came from, so matches found case-insensitively can be cut from the
/// original casing.
struct LoweredText<'a> {
    original: &'a str,
    lower: String,
    offsets: Vec<(usize, usize)>,
}

impl<'a> LoweredText<'a> {
    fn new(original: &'a str) -> Self {
        let mut lower = String::with_capacity(original.len());
        let mut offsets = Vec::with_capacity(original.len());

        for (byte, c) in original.char_indices() {
            for lc in c.to_lowercase() {
                offsets.push((lower.len(), byte));
                lower.push(lc);
            }
        }

        Self {
            original,
            lower,
            offsets,
        }
    }

    /// Original text starting at the character that produced `lower_pos`.
    /// A position inside a multi-character lowering resumes after the
    /// original character that expanded.
    fn original_from(&self, lower_pos: usize) -> &'a str {
        let Ok(i) = self.offsets.binary_search_by_key(&lower_pos, |&(l, _)| l) else {
            return "";
        };

        let source = self.offsets[i].1;
        let continues_expansion = i > 0 && self.offsets[i - 1].1 == source;
        if !continues_expansion {
            return &self.original[source..];
        }

        self.offsets[i..]
            .iter()
            .find(|&&(_, orig)| orig != source)
            .map_or("", |&(_, orig)| &self.original[orig..])
    }

    /// Text following the first occurrence of `phrase`, if present.
    fn after_first(&self, phrase: &str) -> Option<&'a str> {
        self.lower
            .find(phrase)
            .map(|pos| self.original_from(pos + phrase.len()))
    }
}

/// Scans hit snippets for candidate facts using the pattern library.
#[derive(Debug)]
pub struct FactExtractor {
    patterns: PatternLibrary,
}

impl FactExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_patterns(PatternLibrary::compile()?))
    }

    #[must_use]
    pub fn with_patterns(patterns: PatternLibrary) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Facts found in a single hit.
    #[must_use]
    pub fn extract(&self, hit: &SearchHit, subject: &Subject) -> CandidateFactSet {
        let mut facts = CandidateFactSet::new();
        self.extract_into(hit, subject, &mut facts);
        facts
    }

    /// Appends the facts found in `hit` to a running set. Values already
    /// present in a category are skipped, so first-seen order is kept
    /// across calls.
    pub fn extract_into(&self, hit: &SearchHit, subject: &Subject, facts: &mut CandidateFactSet) {
        self.extract_emails(&hit.snippet, subject, facts);
        self.extract_phones(&hit.snippet, facts);

        let lowered = LoweredText::new(&hit.snippet);
        for rule in self.patterns.indicator_rules() {
            extract_indicated(rule, &lowered, facts);
        }

        extract_website(&hit.url, subject, facts);
    }

    fn extract_emails(&self, snippet: &str, subject: &Subject, facts: &mut CandidateFactSet) {
        let Some(first) = subject.first_token() else {
            return;
        };

        for m in self.patterns.email.find_iter(snippet) {
            let email = m.as_str();
            if email.to_lowercase().contains(first) {
                facts.insert(FactCategory::Email, email);
            }
        }
    }

    /// A phone candidate is the country-code and area-code groups of a match
    /// joined together; matches where neither group took part yield nothing.
    fn extract_phones(&self, snippet: &str, facts: &mut CandidateFactSet) {
        for caps in self.patterns.phone.captures_iter(snippet) {
            let joined: String = [caps.get(1), caps.get(2)]
                .into_iter()
                .flatten()
                .map(|m| m.as_str())
                .collect();
            let phone = joined.trim();
            if !phone.is_empty() {
                facts.insert(FactCategory::Phone, phone);
            }
        }
    }
}

fn extract_indicated(rule: &IndicatorRule, text: &LoweredText<'_>, facts: &mut CandidateFactSet) {
    for phrase in rule.phrases {
        let Some(following) = text.after_first(phrase) else {
            continue;
        };

        let candidate = rule.shape(following);
        if IndicatorRule::accepts(&candidate) {
            facts.insert(rule.category, candidate);
        }
    }
}

fn extract_website(url: &str, subject: &Subject, facts: &mut CandidateFactSet) {
    if url.is_empty() {
        return;
    }

    let url_lower = url.to_lowercase();
    let by_full_name = !subject.compact().is_empty() && url_lower.contains(subject.compact());
    let by_first_name = subject
        .first_token()
        .is_some_and(|first| url_lower.contains(first));

    if by_full_name || by_first_name {
        facts.insert(FactCategory::Website, url);
    }
}
