//! Page retrieval.
//!
//! [`Fetcher`] is the seam between the scraping pipeline and the network.
//! Every source adapter owns its own fetcher, so an HTTP session lives
//! exactly as long as the adapter that uses it.

use crate::error::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Browser-like User-Agent; several sources serve an empty shell to unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieve the HTML body of a page.
pub trait Fetcher {
    /// Fetch `url` and return its body decoded as text.
    ///
    /// Any transport failure or non-2xx status is an error.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`Fetcher`] backed by a dedicated [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the crate's User-Agent and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let request_error = |source| ScrapeError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(request_error)?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
