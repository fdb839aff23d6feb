// src/http/error.rs
// =============================================================================
// Errors raised while building the HTTP client or downloading a page.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("invalid proxy address '{0}': {1}")]
    InvalidProxy(String, #[source] reqwest::Error),

    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("response body exceeds buffer size of {0} bytes")]
    BodyTooLarge(usize),
}
