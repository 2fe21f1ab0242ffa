//! Blocking HTTP client for the subreddit listing endpoint.

use super::error::ListingError;
use super::PageSource;
use crate::model::{Listing, Page};
use std::time::Duration;

/// Sent on every request. Not configurable.
pub const USER_AGENT: &str = concat!("redditurls/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Listing client over `reqwest::blocking`. One request in flight at a time.
#[derive(Debug)]
pub struct ListingClient {
    inner: reqwest::blocking::Client,
    base_url: String,
}

impl ListingClient {
    /// Client for the default host and timeout.
    pub fn new() -> Result<Self, ListingError> {
        Self::builder().build()
    }

    pub fn builder() -> ListingClientBuilder {
        ListingClientBuilder::default()
    }

    /// GET `url` and decode the body as one listing page.
    fn get_page(&self, url: &str) -> Result<Page, ListingError> {
        tracing::debug!(url, "requesting listing page");
        let response = self
            .inner
            .get(url)
            .send()
            .map_err(|e| ListingError::Network {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().map_err(|e| ListingError::BodyRead {
            url: url.to_string(),
            source: e,
        })?;
        let listing: Listing =
            serde_json::from_slice(&body).map_err(|e| ListingError::Decode {
                url: url.to_string(),
                source: e,
            })?;
        Ok(listing.into())
    }
}

impl PageSource for ListingClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_page(&mut self, url: &str) -> Result<Page, ListingError> {
        self.get_page(url)
    }
}

/// Builder for ListingClient with optional base URL and timeout.
#[derive(Debug)]
pub struct ListingClientBuilder {
    base_url: Option<String>,
    timeout_secs: u64,
}

impl Default for ListingClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ListingClientBuilder {
    /// Scheme and host the listing path is appended to. Default `https://www.reddit.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout in seconds. Default 30.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<ListingClient, ListingError> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(ListingError::ClientBuild)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(ListingClient { inner, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_is_fixed_crate_identifier() {
        assert!(USER_AGENT.starts_with("redditurls/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn builder_defaults_to_reddit() -> Result<(), ListingError> {
        let client = ListingClient::new()?;
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        Ok(())
    }

    #[test]
    fn builder_trims_trailing_slash_from_base() -> Result<(), ListingError> {
        let client = ListingClient::builder()
            .base_url("http://127.0.0.1:8080/")
            .timeout_secs(5)
            .build()?;
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        Ok(())
    }
}
