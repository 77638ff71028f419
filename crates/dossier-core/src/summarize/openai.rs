use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{Digest, SummarizeError, Summarizer, SummaryOutcome};
use crate::config::SummarizerConfig;

const SYSTEM_PROMPT: &str = "You are a professional summarizer. Create concise, factual summaries based only on the provided information.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Summaries from an OpenAI-compatible chat completions endpoint.
pub struct OpenAiSummarizer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiSummarizer {
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(SummarizeError::NotConfigured)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Checks that the key is accepted by listing models.
    pub async fn verify(&self) -> Result<(), SummarizeError> {
        let url = format!("{}/models", self.base_url);

        let response = self.http.get(&url).headers(self.headers()).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        Ok(())
    }

    async fn complete(&self, digest: &Digest) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: Some(SYSTEM_PROMPT.into()),
                },
                ChatMessage {
                    role: "user".into(),
                    content: Some(build_prompt(digest)?),
                },
            ],
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %request.model, "Summary request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        let chat: ChatResponse = response.json().await?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SummarizeError::EmptyResponse)
    }
}

fn build_prompt(digest: &Digest) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(digest)?;
    Ok(format!(
        "Based on the following information about {name}, provide a brief professional summary (2-3 sentences):\n\n{data}\n\nSummary:",
        name = digest.name,
    ))
}

#[async_trait::async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, digest: &Digest) -> SummaryOutcome {
        let result = self.complete(digest).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Summary generation failed");
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = OpenAiSummarizer::from_config(&SummarizerConfig::default());
        assert!(matches!(result, Err(SummarizeError::NotConfigured)));

        let empty = SummarizerConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiSummarizer::from_config(&empty),
            Err(SummarizeError::NotConfigured)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = SummarizerConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };

        let summarizer = OpenAiSummarizer::from_config(&config).unwrap();
        assert_eq!(summarizer.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_prompt_embeds_digest() {
        let digest = Digest {
            name: "John Smith".into(),
            social_profiles: vec!["Linkedin".into()],
            articles_count: 1,
            ..Default::default()
        };

        let prompt = build_prompt(&digest).unwrap();

        assert!(prompt.starts_with("Based on the following information about John Smith"));
        assert!(prompt.contains("\"social_profiles\": [\n    \"Linkedin\"\n  ]"));
        assert!(prompt.ends_with("Summary:"));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": " Jane is a designer. "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some(" Jane is a designer. ")
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let config = SummarizerConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://127.0.0.1:9/v1".into(),
            ..Default::default()
        };
        let summarizer = OpenAiSummarizer::from_config(&config).unwrap();

        let outcome = summarizer.summarize(&Digest::default()).await;

        assert!(matches!(outcome, SummaryOutcome::Unavailable(_)));
    }
}
