// src/http/fetch.rs
// =============================================================================
// Downloads HTML pages.
//
// Key functionality:
// - GET a page and follow redirects (reqwest does that for us)
// - Remember the final URL, relative links resolve against it
// - Refuse bodies larger than the client's buffer size
// - Fetch many pages concurrently, bounded by max connections
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Streams: buffer_unordered runs a limited number of futures at once
// =============================================================================

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use url::Url;

use super::client::HttpClient;
use super::error::HttpError;

/// A downloaded page
#[derive(Debug, Clone)]
pub struct Page {
    /// Where the page was actually served from, after redirects
    pub url: Url,
    pub body: String,
}

impl HttpClient {
    // Fetches a single page
    //
    // Parameters:
    //   url: absolute URL of the page to download
    //
    // Returns: Result<Page, HttpError>
    //   Success: the page body plus the URL it was served from
    //   Error: invalid URL, network failure, non-2xx status, or a body
    //          bigger than buffer_size
    pub async fn fetch(&self, url: &str) -> Result<Page, HttpError> {
        // Parse first so a typo gets a clear error instead of a request failure
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(url.to_string(), e))?;

        debug!("Fetching {parsed}");
        let mut response = self.client.get(parsed).send().await?;

        // 2xx only; 3xx were already followed by reqwest
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }

        // After redirects this can differ from the URL we asked for
        let final_url = response.url().clone();
        let mut body = Vec::new();

        // Read chunk by chunk so an oversized page is rejected early
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.buffer_size {
                return Err(HttpError::BodyTooLarge(self.buffer_size));
            }
            body.extend_from_slice(&chunk);
        }

        // Invalid UTF-8 becomes U+FFFD, the HTML parser copes with that
        Ok(Page {
            url: final_url,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

// Fetches every URL, at most `client.max_connections()` at a time
//
// Returns one (requested url, result) pair per input, in completion order.
pub async fn fetch_pages(
    client: &HttpClient,
    urls: Vec<String>,
) -> Vec<(String, Result<Page, HttpError>)> {
    let futures = urls.into_iter().map(|url| async move {
        let result = client.fetch(&url).await;
        if let Err(e) = &result {
            warn!("Failed to fetch {url}: {e}");
        }
        (url, result)
    });

    stream::iter(futures)
        .buffer_unordered(client.max_connections())
        .collect()
        .await
}
