use serde::{Deserialize, Serialize};

/// One raw result returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "body")]
    pub snippet: String,
    #[serde(default, alias = "href", alias = "link")]
    pub url: String,
}

impl SearchHit {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }

    /// First `max_chars` characters of the snippet.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.snippet.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_counts_characters() {
        let hit = SearchHit::new("t", "héllo wörld", "https://example.com");
        assert_eq!(hit.excerpt(4), "héll");
        assert_eq!(hit.excerpt(200), "héllo wörld");
    }

    #[test]
    fn test_deserialize_provider_field_names() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"title": "Jane", "body": "bio text", "href": "https://jane.dev"}"#,
        )
        .unwrap();

        assert_eq!(hit.snippet, "bio text");
        assert_eq!(hit.url, "https://jane.dev");
    }
}
