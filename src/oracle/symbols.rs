//! Exchange symbol reconciliation
//!
//! Every exchange spells its markets differently. A `SymbolMapper` turns the
//! exchange-native symbol into the contract's canonical pair name, and
//! `PrecisionOverrides` carries per-exchange digit corrections for pairs
//! whose reported decimals disagree with the contract.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Exchange symbol -> canonical pair name (lowercase, no separator)
pub trait SymbolMapper: Send + Sync {
    /// `None` when the symbol cannot be interpreted by this mapper
    fn canonical(&self, raw: &str) -> Option<String>;
}

/// `BASE-QUOTE` exchanges: "WAXP-BTC" -> "waxpbtc"
#[derive(Debug, Clone)]
pub struct SeparatorStripMapper {
    separator: char,
}

impl SeparatorStripMapper {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for SeparatorStripMapper {
    fn default() -> Self {
        Self::new('-')
    }
}

impl SymbolMapper for SeparatorStripMapper {
    fn canonical(&self, raw: &str) -> Option<String> {
        // only the first separator is removed
        Some(raw.to_lowercase().replacen(self.separator, "", 1))
    }
}

/// `QUOTE-BASE` exchanges: "BTC-WAXP" -> "waxpbtc"
#[derive(Debug, Clone)]
pub struct QuoteBaseMapper {
    separator: char,
}

impl QuoteBaseMapper {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl SymbolMapper for QuoteBaseMapper {
    fn canonical(&self, raw: &str) -> Option<String> {
        let lower = raw.to_lowercase();
        let (quote, base) = lower.split_once(self.separator)?;
        if quote.is_empty() || base.is_empty() {
            return None;
        }
        Some(format!("{}{}", base, quote))
    }
}

/// Order of assets in an exchange's symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolOrder {
    #[default]
    BaseQuote,
    QuoteBase,
}

impl SymbolOrder {
    pub fn mapper(self, separator: char) -> Box<dyn SymbolMapper> {
        match self {
            SymbolOrder::BaseQuote => Box::new(SeparatorStripMapper::new(separator)),
            SymbolOrder::QuoteBase => Box::new(QuoteBaseMapper::new(separator)),
        }
    }
}

impl fmt::Display for SymbolOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolOrder::BaseQuote => write!(f, "base_quote"),
            SymbolOrder::QuoteBase => write!(f, "quote_base"),
        }
    }
}

/// Per-pair digit adjustments applied on top of `quoted_precision`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecisionOverrides {
    adjustments: HashMap<String, i32>,
}

impl PrecisionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pair: &str, digits: i32) -> Self {
        self.adjustments.insert(pair.to_string(), digits);
        self
    }

    pub fn adjustment(&self, pair: &str) -> i32 {
        self.adjustments.get(pair).copied().unwrap_or(0)
    }

    /// Contract precision plus this exchange's correction, never below zero
    pub fn effective_precision(&self, pair: &str, quoted_precision: u32) -> u32 {
        let adjusted = i64::from(quoted_precision) + i64::from(self.adjustment(pair));
        adjusted.clamp(0, i64::from(u32::MAX)) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

impl From<HashMap<String, i32>> for PrecisionOverrides {
    fn from(adjustments: HashMap<String, i32>) -> Self {
        Self { adjustments }
    }
}
