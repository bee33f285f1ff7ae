//! Cryptowatch single-market price (gate.io WAXP/ETH)

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::oracle::sources::{build_http_client, get_json, TickerSource};
use crate::types::TickerResponse;

pub const CRYPTOWATCH_GATEIO_WAXPETH_URL: &str =
    "https://api.cryptowat.ch/markets/gateio/waxpeth/price";

pub struct CryptowatchClient {
    client: Client,
    url: String,
}

impl CryptowatchClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl TickerSource for CryptowatchClient {
    fn name(&self) -> &'static str {
        "Cryptowatch"
    }

    async fn fetch_ticker(&self) -> Result<Option<TickerResponse>> {
        let ticker: Option<TickerResponse> = get_json(&self.client, &self.url, self.name()).await?;
        tracing::debug!(source = %self.name(), url = %self.url, present = ticker.is_some(), "Fetched ticker");
        Ok(ticker)
    }
}
