use serde::{Deserialize, Serialize};

/// Which search provider backs profile lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBackend {
    /// DuckDuckGo HTML endpoint, no key required
    #[default]
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    /// Serper Google search API
    Serper,
}

impl SearchBackend {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo",
            Self::Serper => "serper",
        }
    }
}

impl std::str::FromStr for SearchBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "serper" => Ok(Self::Serper),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub backend: SearchBackend,
    pub serper_api_key: Option<String>,
    /// Results requested when building a profile
    pub profile_results: usize,
    /// Results requested for a plain web search
    pub web_results: usize,
    pub timeout_seconds: u32,
    /// User agent to use (rotated by default)
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackend::DuckDuckGo,
            serper_api_key: None,
            profile_results: 15,
            web_results: 5,
            timeout_seconds: 20,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Summaries fall back to a fixed sentence when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 150,
            timeout_seconds: 30,
        }
    }
}

impl SummarizerConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Engine configuration. Values are never mutated in place; updates return
/// a new configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub summarizer: SummarizerConfig,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = non_empty("DOSSIER_SEARCH_BACKEND") {
            config.search.backend = backend.parse()?;
        }
        config.search.serper_api_key = non_empty("SERPER_API_KEY");
        config.summarizer.api_key = non_empty("OPENAI_API_KEY");
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            config.summarizer.base_url = url;
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            config.summarizer.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_summarizer_key(&self, api_key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.summarizer.api_key = Some(api_key.into());
        next
    }

    #[must_use]
    pub fn with_serper_key(&self, api_key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.search.serper_api_key = Some(api_key.into());
        next
    }

    #[must_use]
    pub fn with_backend(&self, backend: SearchBackend) -> Self {
        let mut next = self.clone();
        next.search.backend = backend;
        next
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.backend == SearchBackend::Serper && self.search.serper_api_key.is_none() {
            return Err(ConfigError::MissingSerperKey);
        }
        if self.search.profile_results == 0 || self.search.web_results == 0 {
            return Err(ConfigError::InvalidLimit);
        }
        if self.search.timeout_seconds == 0 || self.summarizer.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.search.serper_api_key = copy.search.serper_api_key.as_deref().map(mask);
        copy.summarizer.api_key = copy.summarizer.api_key.as_deref().map(mask);
        copy
    }
}

fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Serper backend selected but SERPER_API_KEY is not set")]
    MissingSerperKey,
    #[error("Unknown search backend: {0}")]
    UnknownBackend(String),
    #[error("Result limits must be greater than zero")]
    InvalidLimit,
    #[error("Timeouts must be greater than zero")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.search.backend, SearchBackend::DuckDuckGo);
        assert_eq!(config.search.profile_results, 15);
        assert_eq!(config.search.web_results, 5);
        assert_eq!(config.summarizer.model, "gpt-4");
        assert_eq!(config.summarizer.max_tokens, 150);
        assert!(!config.summarizer.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_keys() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("DOSSIER_SEARCH_BACKEND", "serper"),
            ("SERPER_API_KEY", "serper-key"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap();

        assert_eq!(config.search.backend, SearchBackend::Serper);
        assert_eq!(config.search.serper_api_key.as_deref(), Some("serper-key"));
        assert!(config.summarizer.is_configured());
        assert_eq!(config.summarizer.model, "gpt-4o-mini");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = EngineConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.summarizer.api_key.is_none());
    }

    #[test]
    fn test_serper_requires_key() {
        let result = EngineConfig::from_lookup(lookup(&[("DOSSIER_SEARCH_BACKEND", "serper")]));
        assert!(matches!(result, Err(ConfigError::MissingSerperKey)));
    }

    #[test]
    fn test_unknown_backend() {
        let result = EngineConfig::from_lookup(lookup(&[("DOSSIER_SEARCH_BACKEND", "altavista")]));
        assert!(matches!(result, Err(ConfigError::UnknownBackend(_))));
    }

    #[test]
    fn test_updates_return_new_config() {
        let original = EngineConfig::default();
        let updated = original.with_summarizer_key("sk-new");

        assert!(original.summarizer.api_key.is_none());
        assert_eq!(updated.summarizer.api_key.as_deref(), Some("sk-new"));

        let serper = updated.with_serper_key("k").with_backend(SearchBackend::Serper);
        assert!(serper.validate().is_ok());
        assert_eq!(updated.search.backend, SearchBackend::DuckDuckGo);
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let config = EngineConfig::default()
            .with_summarizer_key("sk-abcdefghijklmnop")
            .with_serper_key("short");

        let redacted = config.redacted();

        assert_eq!(redacted.summarizer.api_key.as_deref(), Some("****mnop"));
        assert_eq!(redacted.search.serper_api_key.as_deref(), Some("****"));
        assert_eq!(
            config.summarizer.api_key.as_deref(),
            Some("sk-abcdefghijklmnop")
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.search.backend, parsed.search.backend);
        assert!(json.contains("\"duckduckgo\""));
    }
}
