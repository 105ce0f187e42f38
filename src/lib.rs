//! Proxy Sweep - Proxy List Downloader and Checker
//!
//! Downloads proxy lists from public sources, verifies which candidates
//! are live by issuing a test request through each under bounded
//! concurrency, and reports the working subset.

pub mod proxy;

pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
