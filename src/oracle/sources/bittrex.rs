//! Bittrex v3 market summaries
//!
//! One request returns every market; only those whose symbol contains the
//! configured asset filter are kept.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::oracle::sources::{build_http_client, get_json, SummarySource};
use crate::types::RawExchangeQuote;

pub const BITTREX_SUMMARIES_URL: &str = "https://api.bittrex.com/v3/markets/summaries";

pub struct BittrexClient {
    client: Client,
    url: String,
    market_filter: String,
}

impl BittrexClient {
    pub fn new(url: &str, market_filter: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            url: url.to_string(),
            market_filter: market_filter.to_string(),
        })
    }

    /// Keep markets quoting the asset we feed
    fn filter_markets(&self, markets: Vec<RawExchangeQuote>) -> Vec<RawExchangeQuote> {
        markets
            .into_iter()
            .filter(|q| q.symbol.contains(&self.market_filter))
            .collect()
    }
}

#[async_trait]
impl SummarySource for BittrexClient {
    fn name(&self) -> &'static str {
        "Bittrex"
    }

    async fn fetch_summaries(&self) -> Result<Option<Vec<RawExchangeQuote>>> {
        let markets: Option<Vec<RawExchangeQuote>> =
            get_json(&self.client, &self.url, self.name()).await?;

        let Some(markets) = markets else {
            tracing::warn!(source = %self.name(), "Empty summaries response");
            return Ok(None);
        };

        let total = markets.len();
        let markets = self.filter_markets(markets);
        tracing::debug!(
            source = %self.name(),
            total,
            kept = markets.len(),
            filter = %self.market_filter,
            "Fetched market summaries"
        );

        Ok(Some(markets))
    }
}
