//! Proxy list loader for fetching candidates from remote sources

use crate::proxy::models::{ProxyCandidate, ProxyCategory};
use crate::proxy::sources::SourceRegistry;
use crate::Result;
use anyhow::bail;
use reqwest::{Client, StatusCode};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for source downloads in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default user agent for source downloads
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the proxy loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Timeout for each source download
    pub timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Proxy loader for downloading candidate lists from configured sources
pub struct ProxyLoader {
    config: LoaderConfig,
    registry: SourceRegistry,
    client: Client,
}

impl ProxyLoader {
    /// Create a loader with default configuration and built-in sources
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::default(), SourceRegistry::default())
    }

    /// Create a loader with custom configuration and sources
    pub fn with_config(config: LoaderConfig, registry: SourceRegistry) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            config,
            registry,
            client,
        })
    }

    /// Download and merge all source lists for a category.
    ///
    /// Each source is fetched in turn; a failing source is skipped and
    /// never aborts the load. The result is the deduplicated union of
    /// every line successfully fetched, in no particular order. If all
    /// sources fail the result is empty and the caller must treat the
    /// run as having nothing to check.
    pub async fn load(&self, category: ProxyCategory) -> Vec<ProxyCandidate> {
        let mut unique: HashSet<ProxyCandidate> = HashSet::new();

        for url in self.registry.urls(category) {
            match self.fetch_source(url).await {
                Ok(candidates) => {
                    debug!(url = %url, count = candidates.len(), "fetched source");
                    unique.extend(candidates);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "skipping failed source");
                }
            }
        }

        unique.into_iter().collect()
    }

    /// Fetch a single source URL and split it into candidates
    async fn fetch_source(&self, url: &str) -> Result<Vec<ProxyCandidate>> {
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            bail!("HTTP status {}", response.status());
        }

        let body = response.text().await?;
        Ok(body.lines().filter_map(ProxyCandidate::parse).collect())
    }

    /// Timeout applied to each source download
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::collections::HashMap;

    fn registry_for(category: ProxyCategory, urls: Vec<String>) -> SourceRegistry {
        let mut sources = HashMap::new();
        sources.insert(category, urls);
        SourceRegistry::new(sources)
    }

    fn loader_with(registry: SourceRegistry) -> ProxyLoader {
        ProxyLoader::with_config(LoaderConfig::default(), registry).unwrap()
    }

    #[test]
    fn test_loader_config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_loader_config_builder() {
        let config = LoaderConfig::new()
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("Custom Agent".to_string());

        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "Custom Agent");
    }

    #[tokio::test]
    async fn test_load_merges_and_deduplicates_sources() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/a.txt")
            .with_status(200)
            .with_body("1.1.1.1:80\n2.2.2.2:80\n1.1.1.1:80\n")
            .create_async()
            .await;
        let second = server
            .mock("GET", "/b.txt")
            .with_status(200)
            .with_body("3.3.3.3:80\n")
            .create_async()
            .await;

        let registry = registry_for(
            ProxyCategory::Http,
            vec![
                format!("{}/a.txt", server.url()),
                format!("{}/b.txt", server.url()),
            ],
        );
        let candidates = loader_with(registry).load(ProxyCategory::Http).await;

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(candidates.len(), 3);
        let unique: HashSet<_> = candidates.iter().map(|c| c.as_str()).collect();
        assert!(unique.contains("1.1.1.1:80"));
        assert!(unique.contains("2.2.2.2:80"));
        assert!(unique.contains("3.3.3.3:80"));
    }

    #[tokio::test]
    async fn test_load_trims_lines_and_skips_blanks() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/list.txt")
            .with_status(200)
            .with_body("  1.1.1.1:80 \r\n\n\t\n2.2.2.2:80\n")
            .create_async()
            .await;

        let registry = registry_for(
            ProxyCategory::Socks5,
            vec![format!("{}/list.txt", server.url())],
        );
        let candidates = loader_with(registry).load(ProxyCategory::Socks5).await;

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.as_str() == c.as_str().trim()));
    }

    #[tokio::test]
    async fn test_load_skips_failing_source_and_continues() {
        let mut server = Server::new_async().await;
        let _bad = server
            .mock("GET", "/bad.txt")
            .with_status(503)
            .create_async()
            .await;
        let _good = server
            .mock("GET", "/good.txt")
            .with_status(200)
            .with_body("1.1.1.1:80\n")
            .create_async()
            .await;

        let registry = registry_for(
            ProxyCategory::Http,
            vec![
                format!("{}/bad.txt", server.url()),
                format!("{}/good.txt", server.url()),
            ],
        );
        let candidates = loader_with(registry).load(ProxyCategory::Http).await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].as_str(), "1.1.1.1:80");
    }

    #[tokio::test]
    async fn test_load_all_sources_failing_yields_empty() {
        let mut server = Server::new_async().await;
        let _down = server
            .mock("GET", "/down.txt")
            .with_status(500)
            .create_async()
            .await;

        let registry = registry_for(
            ProxyCategory::Socks4,
            vec![
                format!("{}/down.txt", server.url()),
                "http://127.0.0.1:1/unreachable.txt".to_string(),
            ],
        );
        let candidates = loader_with(registry).load(ProxyCategory::Socks4).await;

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_load_queries_only_requested_category() {
        let mut server = Server::new_async().await;
        let http_mock = server
            .mock("GET", "/http.txt")
            .with_status(200)
            .with_body("1.1.1.1:80\n")
            .expect(1)
            .create_async()
            .await;
        let socks_mock = server
            .mock("GET", "/socks5.txt")
            .with_status(200)
            .with_body("2.2.2.2:1080\n")
            .expect(0)
            .create_async()
            .await;

        let mut sources = HashMap::new();
        sources.insert(
            ProxyCategory::Http,
            vec![format!("{}/http.txt", server.url())],
        );
        sources.insert(
            ProxyCategory::Socks5,
            vec![format!("{}/socks5.txt", server.url())],
        );

        let candidates = loader_with(SourceRegistry::new(sources))
            .load(ProxyCategory::Http)
            .await;

        http_mock.assert_async().await;
        socks_mock.assert_async().await;
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_load_unconfigured_category_yields_empty() {
        let registry = registry_for(ProxyCategory::Http, Vec::new());
        let candidates = loader_with(registry).load(ProxyCategory::Https).await;
        assert!(candidates.is_empty());
    }
}
