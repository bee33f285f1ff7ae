//! Exchange quote sources (Bittrex summaries, Cryptowatch ticker)

mod bittrex;
mod cryptowatch;

pub use bittrex::{BittrexClient, BITTREX_SUMMARIES_URL};
pub use cryptowatch::{CryptowatchClient, CRYPTOWATCH_GATEIO_WAXPETH_URL};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::types::{RawExchangeQuote, TickerResponse};

/// Exchange exposing a multi-pair market summary
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Get the source name
    fn name(&self) -> &'static str;

    /// Fetch market summaries. `None` when the exchange answered `null`.
    async fn fetch_summaries(&self) -> Result<Option<Vec<RawExchangeQuote>>>;
}

/// Exchange polled for a single pair's last price
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Get the source name
    fn name(&self) -> &'static str;

    /// Fetch the ticker. `None` when the exchange answered `null`.
    async fn fetch_ticker(&self) -> Result<Option<TickerResponse>>;
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .context("Failed to create HTTP client")
}

/// GET a JSON document, failing on non-2xx statuses
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    source: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch quotes from {}", source))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{} returned {}: {}", source, status, body);
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", source))
}
