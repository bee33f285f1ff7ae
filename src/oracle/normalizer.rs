//! Multi-pair exchange summary normalizer
//!
//! Turns an exchange's market summaries into contract-ready quote records:
//! symbol reconciliation, required-pair filtering, metadata lookup, midpoint
//! and fixed-point scaling. Records that cannot be priced are dropped rather
//! than failing the batch.

use std::collections::HashSet;

use crate::oracle::metadata::PairMetadataStore;
use crate::oracle::scaling::{midpoint, scale_to_integer};
use crate::oracle::symbols::{PrecisionOverrides, SeparatorStripMapper, SymbolMapper};
use crate::oracle::QuoteError;
use crate::types::{QuoteRecord, RawExchangeQuote};

pub struct ExchangeSummaryNormalizer {
    mapper: Box<dyn SymbolMapper>,
    overrides: PrecisionOverrides,
}

impl Default for ExchangeSummaryNormalizer {
    fn default() -> Self {
        Self::new(Box::new(SeparatorStripMapper::default()))
    }
}

impl ExchangeSummaryNormalizer {
    pub fn new(mapper: Box<dyn SymbolMapper>) -> Self {
        Self {
            mapper,
            overrides: PrecisionOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: PrecisionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Normalize one exchange's summaries.
    ///
    /// A missing collection is a caller bug and fails with
    /// `QuoteError::InvalidArgument`; empty collections simply produce no
    /// records. Output keeps the input order.
    pub fn normalize(
        &self,
        raw_quotes: Option<&[RawExchangeQuote]>,
        metadata: Option<&PairMetadataStore>,
        required: Option<&[String]>,
    ) -> Result<Vec<QuoteRecord>, QuoteError> {
        let raw_quotes = raw_quotes.ok_or(QuoteError::InvalidArgument("raw_quotes"))?;
        let metadata = metadata.ok_or(QuoteError::InvalidArgument("metadata"))?;
        let required = required.ok_or(QuoteError::InvalidArgument("required"))?;

        let required: HashSet<&str> = required.iter().map(String::as_str).collect();

        let records = raw_quotes
            .iter()
            .filter_map(|quote| {
                let pair = self.mapper.canonical(&quote.symbol)?;
                if !required.contains(pair.as_str()) {
                    return None;
                }
                self.price_quote(quote, pair, metadata)
            })
            .collect();

        Ok(records)
    }

    fn price_quote(
        &self,
        quote: &RawExchangeQuote,
        pair: String,
        metadata: &PairMetadataStore,
    ) -> Option<QuoteRecord> {
        let Some(meta) = metadata.get(&pair) else {
            tracing::trace!(pair = %pair, symbol = %quote.symbol, "Pair not registered or inactive");
            return None;
        };

        let (Some(high), Some(low)) = (quote.high.as_f64(), quote.low.as_f64()) else {
            tracing::warn!(
                pair = %pair,
                high = %quote.high,
                low = %quote.low,
                "Unparsable bounds, dropping quote"
            );
            return None;
        };

        let precision = self
            .overrides
            .effective_precision(&pair, meta.quoted_precision);
        let value = scale_to_integer(midpoint(high, low), precision);

        Some(QuoteRecord { pair, value })
    }
}
