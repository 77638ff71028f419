use std::time::Duration;

use reqwest::Client;

use super::SearchResult;
use crate::config::SearchConfig;

/// HTTP client shared by the search providers.
pub fn build_http_client(config: &SearchConfig) -> SearchResult<Client> {
    let timeout = Duration::from_secs(u64::from(config.timeout_seconds));

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(random_user_agent);

    let client = Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;

    Ok(client)
}

fn random_user_agent() -> String {
    use rand::Rng;

    let agents = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0",
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:128.0) Gecko/20100101 Firefox/128.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    ];

    let mut rng = rand::rng();
    agents[rng.random_range(0..agents.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent_is_browser_like() {
        let ua = random_user_agent();
        assert!(ua.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_build_with_explicit_user_agent() {
        let config = SearchConfig {
            user_agent: Some("dossier-test/1.0".into()),
            ..Default::default()
        };

        assert!(build_http_client(&config).is_ok());
    }
}
