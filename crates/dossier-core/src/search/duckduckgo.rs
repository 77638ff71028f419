use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{SearchError, SearchOutcome, SearchProvider, SearchResult};
use crate::hit::SearchHit;

const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// Keyless search through DuckDuckGo's HTML endpoint.
pub struct DuckDuckGoSearch {
    http: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self {
            http,
            endpoint: DUCKDUCKGO_HTML_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    async fn fetch(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let html = response.text().await?;
        parse_results(&html, limit)
    }
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        tracing::debug!(query, limit, "DuckDuckGo search");

        let result = self.fetch(query, limit).await;
        match &result {
            Ok(hits) => tracing::debug!(query, count = hits.len(), "DuckDuckGo search complete"),
            Err(e) => tracing::warn!(query, error = %e, "DuckDuckGo search failed"),
        }
        result.into()
    }
}

fn selector(css: &str) -> SearchResult<Selector> {
    Selector::parse(css).map_err(|e| SearchError::Parse(e.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts organic results from a DuckDuckGo HTML results page, skipping ads.
pub(crate) fn parse_results(html: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
    let document = Html::parse_document(html);
    let result_sel = selector("div.result")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut hits = Vec::new();

    for result in document.select(&result_sel) {
        if hits.len() >= limit {
            break;
        }

        let is_ad = result
            .value()
            .classes()
            .any(|c| c == "result--ad");
        if is_ad {
            continue;
        }

        let Some(anchor) = result.select(&title_sel).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        hits.push(SearchHit::new(
            element_text(anchor),
            snippet,
            resolve_href(href),
        ));
    }

    Ok(hits)
}

/// Unwraps DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=...`).
fn resolve_href(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let Ok(parsed) = Url::parse(&absolute) else {
        return href.to_string();
    };

    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");

    if is_redirect {
        if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
            return target.into_owned();
        }
    }

    absolute
}
