//! Proxy module for loading and checking proxy candidates
//!
//! This module provides functionality for:
//! - Loading newline-delimited proxy lists from configured remote sources
//! - Deduplicating candidates across sources
//! - Checking candidate liveness with bounded concurrency
//! - Writing working proxies to a file or the console

pub mod checker;
pub mod loader;
pub mod models;
pub mod report;
pub mod sources;

pub use checker::{CheckerConfig, ProxyChecker};
pub use loader::{LoaderConfig, ProxyLoader};
pub use models::{CheckResult, CheckStatus, ProxyCandidate, ProxyCategory};
pub use sources::SourceRegistry;
