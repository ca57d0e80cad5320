pub mod method;
pub mod stats;

use botpulse_shared_models::StatisticsSnapshot;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid stats endpoint '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to stats endpoint failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Stats endpoint returned status {0}")]
    Status(StatusCode),
    #[error("Error decoding stats payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the bot's statistics endpoint.
///
/// Each call issues exactly one GET request. There is no retry and no
/// timeout; the caller decides what to do with a failure.
pub struct StatsApiClient {
    base_url: String,
    reqwest: Client,
}

impl StatsApiClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let reqwest = ClientBuilder::new()
            .default_headers(default_headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { base_url, reqwest })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get0<R: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<R, FetchError> {
        debug!(%url, "fetching");

        let response = self
            .reqwest
            .get(url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn call0<M: method::Method0>(&self) -> Result<M::Response, FetchError> {
        self.get0(&format!("{}{}", self.base_url, M::PATH)).await
    }

    pub async fn fetch_stats(&self) -> Result<StatisticsSnapshot, FetchError> {
        self.call0::<stats::Stats>().await
    }
}
