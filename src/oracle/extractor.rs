//! Single-pair ticker extraction
//!
//! Some exchanges are only polled for one market. Their pair and precision
//! are fixed per extractor and never looked up on the contract.

use crate::oracle::scaling::scale_to_integer;
use crate::types::{QuoteRecord, TickerResponse};

pub const DEFAULT_TICKER_PAIR: &str = "waxpeth";
pub const DEFAULT_TICKER_PRECISION: u32 = 8;

#[derive(Debug, Clone)]
pub struct SinglePairQuoteExtractor {
    pair: String,
    precision: u32,
}

impl Default for SinglePairQuoteExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TICKER_PAIR, DEFAULT_TICKER_PRECISION)
    }
}

impl SinglePairQuoteExtractor {
    pub fn new(pair: &str, precision: u32) -> Self {
        Self {
            pair: pair.to_string(),
            precision,
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    /// Scale the ticker price for this extractor's pair.
    ///
    /// No response means no quote. An unparsable price still yields a
    /// record with value 0 so one bad upstream value cannot sink the batch.
    pub fn extract_single(&self, ticker: Option<&TickerResponse>) -> Option<QuoteRecord> {
        let result = ticker?.result.as_ref()?;

        let value = match result.price.as_f64() {
            Some(price) => scale_to_integer(price, self.precision),
            None => {
                tracing::warn!(
                    pair = %self.pair,
                    price = ?result.price,
                    "Unparsable ticker price, submitting zero"
                );
                0
            }
        };

        Some(QuoteRecord::new(&self.pair, value))
    }
}
