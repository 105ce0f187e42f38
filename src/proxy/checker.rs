//! Concurrency-bounded proxy checker

use crate::proxy::models::{CheckResult, ProxyCandidate, ProxyCategory};
use crate::Result;
use futures::stream::{self, StreamExt};
use futures::Future;
use reqwest::{Client, Proxy as ReqwestProxy, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// Default timeout for each proxy check in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default number of concurrent checks
const DEFAULT_CONCURRENCY: usize = 50;

/// Default URL to test proxies against
const DEFAULT_TEST_URL: &str = "https://www.example.com/";

/// Configuration for the proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for each proxy check
    pub timeout: Duration,
    /// Number of concurrent checks
    pub concurrency: usize,
    /// URL to test proxies against
    pub test_url: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            test_url: DEFAULT_TEST_URL.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_test_url(mut self, url: String) -> Self {
        self.test_url = url;
        self
    }
}

/// Proxy checker for verifying candidate liveness
#[derive(Clone)]
pub struct ProxyChecker {
    config: CheckerConfig,
}

impl ProxyChecker {
    /// Create a new proxy checker with default configuration
    pub fn new() -> Self {
        Self {
            config: CheckerConfig::default(),
        }
    }

    /// Create a new proxy checker with custom configuration
    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Proxy URLs registered for the plain and secure transports.
    ///
    /// Both transports resolve to the same wrapped URL, derived from the
    /// category's scheme and never from the address itself. In particular
    /// the HTTPS category wraps candidates as `https://` for both keys and
    /// the SOCKS categories wrap both as `socksN://`.
    pub fn proxy_urls(candidate: &ProxyCandidate, category: ProxyCategory) -> (String, String) {
        let wrapped = format!("{}://{}", category.scheme(), candidate);
        (wrapped.clone(), wrapped)
    }

    /// Check a single candidate.
    ///
    /// A candidate is working iff a response with status exactly 200
    /// arrives through it before the timeout. Every other outcome is a
    /// uniform failure confined to this candidate.
    pub async fn check(&self, candidate: &ProxyCandidate, category: ProxyCategory) -> CheckResult {
        let start = Instant::now();

        match self.create_client(candidate, category) {
            Ok(client) => {
                match tokio::time::timeout(
                    self.config.timeout,
                    client.get(&self.config.test_url).send(),
                )
                .await
                {
                    Ok(Ok(response)) => {
                        if response.status() == StatusCode::OK {
                            let elapsed = start.elapsed().as_millis() as u64;
                            debug!(candidate = %candidate, elapsed_ms = elapsed, "proxy working");
                            CheckResult::working(candidate.clone(), elapsed)
                        } else {
                            CheckResult::failed(
                                candidate.clone(),
                                format!("HTTP status {}", response.status()),
                            )
                        }
                    }
                    Ok(Err(e)) => CheckResult::failed(candidate.clone(), e.to_string()),
                    Err(_) => CheckResult::timeout(candidate.clone()),
                }
            }
            Err(e) => CheckResult::failed(candidate.clone(), e.to_string()),
        }
    }

    /// Check all candidates with bounded concurrency.
    ///
    /// Every submitted candidate produces a result; results arrive in
    /// completion order, not submission order.
    pub async fn check_all(
        &self,
        candidates: Vec<ProxyCandidate>,
        category: ProxyCategory,
    ) -> Vec<CheckResult> {
        run_bounded(self.config.concurrency, candidates, |candidate| async move {
            self.check(&candidate, category).await
        })
        .await
    }

    /// Check all candidates and keep only the working subset
    pub async fn check_all_working(
        &self,
        candidates: Vec<ProxyCandidate>,
        category: ProxyCategory,
    ) -> Vec<CheckResult> {
        self.check_all(candidates, category)
            .await
            .into_iter()
            .filter(CheckResult::is_working)
            .collect()
    }

    /// Create a reqwest client routing through the candidate.
    ///
    /// Certificate validation is disabled, matching the checker's
    /// uniform success criterion: only the status code matters.
    fn create_client(&self, candidate: &ProxyCandidate, category: ProxyCategory) -> Result<Client> {
        let (http_url, https_url) = Self::proxy_urls(candidate, category);

        let client = Client::builder()
            .proxy(ReqwestProxy::http(&http_url)?)
            .proxy(ReqwestProxy::https(&https_url)?)
            .danger_accept_invalid_certs(true)
            .timeout(self.config.timeout)
            .build()?;

        Ok(client)
    }
}

impl Default for ProxyChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one check future per candidate with at most `concurrency` in flight
async fn run_bounded<F, Fut>(
    concurrency: usize,
    candidates: Vec<ProxyCandidate>,
    check: F,
) -> Vec<CheckResult>
where
    F: Fn(ProxyCandidate) -> Fut,
    Fut: Future<Output = CheckResult>,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));

    stream::iter(candidates)
        .map(|candidate| {
            let sem = Arc::clone(&semaphore);
            let fut = check(candidate);
            async move {
                // Semaphore acquire only fails if the semaphore is closed,
                // which won't happen here since we own the Arc and keep it
                // alive for the duration of the check operation.
                let _permit = sem.acquire().await.expect("Semaphore closed unexpectedly");
                fut.await
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await
}
