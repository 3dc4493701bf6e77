//! HTTP page fetcher

use crate::config::schema::SourceConfig;
use crate::domain::{FetchError, LegTrackError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw page content
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure or a non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`Fetcher`] backed by a shared `reqwest` client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the HTTP client from the source settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                LegTrackError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

fn transport_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(format!("{url}: {error}"))
    } else {
        FetchError::ConnectionFailed(format!("{url}: {error}"))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching page");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::InvalidBody(format!("{url}: {e}")))?;

        tracing::debug!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
