// src/http/client.rs
// =============================================================================
// Builds the HTTP client used to download pages.
//
// HttpClientOptions is a plain configuration record. HttpClientFactory turns
// it into an HttpClient; ReqwestClientFactory is the implementation we ship.
//
// How the options map onto reqwest:
// - max_connections_per_host -> pool_max_idle_per_host
// - proxy (empty = none)     -> Proxy::all, or no_proxy() to ignore env vars
// - skip_tls_verification    -> danger_accept_invalid_certs
// - timeout                  -> timeout
// - headers                  -> default_headers
// - buffer_size              -> the most body bytes we read for one page
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};
use std::collections::HashMap;
use std::time::Duration;

use super::error::HttpError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientOptions {
    pub max_connections_per_host: usize,
    pub buffer_size: usize,
    pub proxy: String,
    pub skip_tls_verification: bool,
    pub timeout: Duration,
    pub headers: HashMap<String, String>,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            max_connections_per_host: 64,
            buffer_size: 4 * 1024 * 1024,
            proxy: String::new(),
            skip_tls_verification: false,
            timeout: Duration::from_secs(10),
            headers: HashMap::new(),
        }
    }
}

pub trait HttpClientFactory {
    fn create(&self, options: &HttpClientOptions) -> Result<HttpClient, HttpError>;
}

/// A reqwest client plus the limits it should respect while fetching
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub(super) client: Client,
    pub(super) buffer_size: usize,
    pub(super) max_connections: usize,
}

impl HttpClient {
    /// How many pages may be downloaded at the same time
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestClientFactory;

impl HttpClientFactory for ReqwestClientFactory {
    // Builds a reqwest client from the options
    //
    // Parameters:
    //   options: connection, proxy, TLS, timeout and header settings
    //
    // Returns: Result<HttpClient, HttpError>
    //   Error: an invalid proxy address or header, or a TLS backend failure
    fn create(&self, options: &HttpClientOptions) -> Result<HttpClient, HttpError> {
        // Headers are validated here, before anything else is built
        let mut builder = Client::builder()
            .pool_max_idle_per_host(options.max_connections_per_host)
            .danger_accept_invalid_certs(options.skip_tls_verification)
            .timeout(options.timeout)
            .default_headers(build_headers(&options.headers)?);

        // An empty proxy means no proxy at all, HTTP_PROXY and friends included
        builder = if options.proxy.is_empty() {
            builder.no_proxy()
        } else {
            let proxy = Proxy::all(options.proxy.as_str())
                .map_err(|e| HttpError::InvalidProxy(options.proxy.clone(), e))?;
            builder.proxy(proxy)
        };

        let client = builder.build().map_err(HttpError::Build)?;

        Ok(HttpClient {
            client,
            buffer_size: options.buffer_size,
            // buffer_unordered(0) would never make progress
            max_connections: options.max_connections_per_host.max(1),
        })
    }
}

// Converts "Name" -> "value" pairs into a HeaderMap
//
// Returns: InvalidHeader naming the first header whose name or value is
//          not allowed in HTTP (spaces in names, newlines in values, ...)
fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(name.clone()))?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_defaults() {
        let client = ReqwestClientFactory.create(&HttpClientOptions::default()).unwrap();
        assert_eq!(client.buffer_size, 4 * 1024 * 1024);
        assert_eq!(client.max_connections(), 64);
    }

    #[test]
    fn test_zero_connections_still_allows_one_fetch() {
        let options = HttpClientOptions {
            max_connections_per_host: 0,
            ..HttpClientOptions::default()
        };
        let client = ReqwestClientFactory.create(&options).unwrap();
        assert_eq!(client.max_connections(), 1);
    }

    #[test]
    fn test_create_with_proxy_and_headers() {
        let options = HttpClientOptions {
            proxy: "http://127.0.0.1:3128".to_string(),
            skip_tls_verification: true,
            headers: HashMap::from([
                ("User-Agent".to_string(), "link-finder".to_string()),
                ("X-Token".to_string(), "abc".to_string()),
            ]),
            ..HttpClientOptions::default()
        };
        assert!(ReqwestClientFactory.create(&options).is_ok());
    }

    #[test]
    fn test_invalid_header_name() {
        let options = HttpClientOptions {
            headers: HashMap::from([("bad header".to_string(), "x".to_string())]),
            ..HttpClientOptions::default()
        };
        let err = ReqwestClientFactory.create(&options).unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeader(name) if name == "bad header"));
    }

    #[test]
    fn test_invalid_header_value() {
        let options = HttpClientOptions {
            headers: HashMap::from([("X-Test".to_string(), "line\nbreak".to_string())]),
            ..HttpClientOptions::default()
        };
        assert!(matches!(
            ReqwestClientFactory.create(&options),
            Err(HttpError::InvalidHeader(_))
        ));
    }
}
