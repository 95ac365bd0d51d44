// src/fetch/mod.rs

pub mod urls;
pub mod zips;

pub use urls::{check_year, report_url, BASE_URL, MAX_YEAR, MIN_YEAR};
pub use zips::{download_zip, save_zip};

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const USER_AGENT: &str = concat!(
    "cotscraper/",
    env!("CARGO_PKG_VERSION"),
    " (CFTC COT report fetcher)"
);

/// Downloads CFTC Disaggregated Futures Only ZIP files over HTTP.
///
/// The underlying `reqwest::Client` (and its connection pool) lives exactly
/// as long as the `Downloader`; dropping it, including dropping an in-flight
/// `download` future, releases the connections. One downloader can serve
/// any number of years.
///
/// ```no_run
/// # async fn run() -> Result<(), cotscraper::error::FetchError> {
/// let dl = cotscraper::fetch::Downloader::new()?;
/// let data = dl.download(2024).await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    url_template: String,
}

impl Downloader {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Build a downloader with its own client, using `timeout` for the whole
    /// request including the body.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(10))
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Wrap a caller-supplied client, e.g. one shared across components.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            url_template: BASE_URL.to_string(),
        }
    }

    /// Point at a different host; `{year}` in `template` is replaced per call.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    /// Fetch the raw ZIP bytes for `year`.
    ///
    /// Years outside `2006..=2100` are rejected before any request is made.
    /// Non-2xx responses surface as `FetchError::Network`; nothing is retried.
    #[instrument(level = "info", skip(self))]
    pub async fn download(&self, year: i32) -> Result<Vec<u8>, FetchError> {
        let url = report_url(&self.url_template, year)?;
        debug!(%url, "GET");

        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "non-success status");
            return Err(FetchError::Network(status));
        }

        let bytes = resp.bytes().await?;
        info!(bytes = bytes.len(), "downloaded COT archive");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_years_before_any_request() {
        // nothing listens on the discard port, so a request would fail
        // with a transport error instead
        let dl = Downloader::new()
            .unwrap()
            .with_url_template("http://127.0.0.1:9/fut_disagg_txt_{year}.zip");

        for year in [1999, 2005, 2101] {
            let err = dl.download(year).await.unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidInput(y) if y == year),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("cotscraper/"));
    }
}
