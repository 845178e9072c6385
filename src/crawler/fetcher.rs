//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for index and detail pages
//! - Error classification into [`FetchError`]
//!
//! There is no retry and no cache. Pacing is the caller's job, see
//! [`Throttle`](super::Throttle).

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use race_harvest::config::UserAgentConfig;
/// use race_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "race-harvest".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues single GET requests and hands back page bodies
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns its body
    ///
    /// The body is decoded with the charset announced by the response,
    /// defaulting to UTF-8.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 2xx response body
    /// * `Err(FetchError::Status)` - any other status
    /// * `Err(FetchError::Transport)` - connection, timeout or body read failure
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!("Fetched {} ({})", url, status);
        response.text().await.map_err(transport)
    }
}
