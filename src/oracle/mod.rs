//! Oracle module - quote normalization and scaling
//!
//! Converts heterogeneous exchange market data into the `{pair, value}`
//! records the delphioracle contract accepts, using the contract's own pair
//! metadata for precision.

mod batch;
mod extractor;
mod metadata;
mod normalizer;
pub mod scaling;
pub mod sources;
mod symbols;

pub use batch::QuoteBatch;
pub use extractor::{SinglePairQuoteExtractor, DEFAULT_TICKER_PAIR, DEFAULT_TICKER_PRECISION};
pub use metadata::PairMetadataStore;
pub use normalizer::ExchangeSummaryNormalizer;
pub use symbols::{
    PrecisionOverrides, QuoteBaseMapper, SeparatorStripMapper, SymbolMapper, SymbolOrder,
};

use thiserror::Error;

/// Errors raised by the quote engine itself.
///
/// Bad market data never shows up here: it is dropped or zeroed instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// A required collection was not provided
    #[error("Invalid argument: `{0}` must be a collection")]
    InvalidArgument(&'static str),
}
