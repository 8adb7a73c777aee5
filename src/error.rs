// src/error.rs
//! Error taxonomy for the analysis pipeline.
//!
//! Fatality rules:
//! - `SourceUnavailable` aborts the run for that source only.
//! - `TemplateMissing` is a deployment/config defect; never retried.
//! - `Transport` / `Authentication` / `RateLimit` fail a single tagging
//!   attempt. `RateLimit` is distinct so a caller can apply backoff; the
//!   core itself does not retry (recommended caller policy: up to 3
//!   attempts, 1s base delay, doubling, with jitter).
//! - `MalformedResponse` is non-fatal: the pipeline degrades to an empty
//!   tag set and keeps going.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The content fetcher could not produce text for this source.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The prompt template resource could not be located.
    #[error("prompt template missing: {0}")]
    TemplateMissing(String),

    /// Network-level failure talking to the tagging service (includes
    /// timeouts and 5xx responses).
    #[error("transport error: {0}")]
    Transport(String),

    /// Missing or rejected API credential.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The tagging service signalled rate limiting (HTTP 429).
    #[error("rate limited by tagging service")]
    RateLimit,

    /// The model reply did not parse into the expected tag structure.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// True for error classes a caller-level retry policy may recover from.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::RateLimit)
    }
}
