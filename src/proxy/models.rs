//! Proxy data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proxy category enumeration
///
/// Each category maps to its own list of source URLs and to the scheme
/// used to wrap candidate addresses when building the proxy client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProxyCategory {
    #[default]
    Http,
    Https,
    Socks4,
    Socks5,
}

impl ProxyCategory {
    /// All supported categories
    pub const ALL: [ProxyCategory; 4] = [
        ProxyCategory::Http,
        ProxyCategory::Https,
        ProxyCategory::Socks4,
        ProxyCategory::Socks5,
    ];

    /// Scheme prefix used when wrapping a candidate address.
    ///
    /// The scheme is derived from the category alone, never from the
    /// address. HTTPS candidates are wrapped as `https://` for both the
    /// plain and secure proxy mappings, SOCKS candidates as `socksN://`
    /// for both.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyCategory::Http => "http",
            ProxyCategory::Https => "https",
            ProxyCategory::Socks4 => "socks4",
            ProxyCategory::Socks5 => "socks5",
        }
    }
}

impl fmt::Display for ProxyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

/// A proxy candidate in `host:port` form.
///
/// Candidates are taken verbatim from source lists with surrounding
/// whitespace trimmed; no further validation is applied. Malformed
/// entries simply fail the liveness check downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyCandidate(String);

impl ProxyCandidate {
    /// Parse a candidate from a source-list line.
    ///
    /// Returns `None` for lines that are empty after trimming.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProxyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a candidate check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CheckStatus {
    Working,
    Failed(String),
    Timeout,
}

/// Result of checking a single candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub candidate: ProxyCandidate,
    pub status: CheckStatus,
    pub latency_ms: Option<u64>,
}

impl CheckResult {
    pub fn working(candidate: ProxyCandidate, latency_ms: u64) -> Self {
        Self {
            candidate,
            status: CheckStatus::Working,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn failed(candidate: ProxyCandidate, error: String) -> Self {
        Self {
            candidate,
            status: CheckStatus::Failed(error),
            latency_ms: None,
        }
    }

    pub fn timeout(candidate: ProxyCandidate) -> Self {
        Self {
            candidate,
            status: CheckStatus::Timeout,
            latency_ms: None,
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self.status, CheckStatus::Working)
    }
}
