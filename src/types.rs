//! Core types used throughout the feeder
//!
//! Wire shapes for exchange payloads, oracle pair metadata and the quote
//! records pushed to the contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One market from a multi-pair exchange summary endpoint.
///
/// Only the symbol and the daily bounds are read; volume, change and
/// timestamp fields are ignored on deserialize. Missing or malformed bounds
/// still deserialize so the whole summary list never fails on one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExchangeQuote {
    /// Exchange-native symbol, e.g. "WAXP-BTC"
    #[serde(default)]
    pub symbol: String,
    /// Usually a decimal string, e.g. "0.000004400000"
    #[serde(default)]
    pub high: PriceField,
    #[serde(default)]
    pub low: PriceField,
}

impl RawExchangeQuote {
    pub fn new(symbol: &str, high: &str, low: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            high: PriceField::Text(high.to_string()),
            low: PriceField::Text(low.to_string()),
        }
    }
}

/// A row of the oracle contract's `pairs` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMetadata {
    /// Canonical pair name, e.g. "waxpbtc"
    pub name: String,
    /// 1 when the contract accepts quotes for this pair
    pub active: u8,
    /// Decimal digits the contract expects in `QuoteRecord::value`
    pub quoted_precision: u32,
    #[serde(default)]
    pub base_symbol: String,
    #[serde(default)]
    pub quote_symbol: String,
}

impl PairMetadata {
    pub fn new(name: &str, active: bool, quoted_precision: u32) -> Self {
        Self {
            name: name.to_string(),
            active: u8::from(active),
            quoted_precision,
            base_symbol: String::new(),
            quote_symbol: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

/// Contract-ready quote: the price scaled by `10^quoted_precision`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub pair: String,
    pub value: u64,
}

impl QuoteRecord {
    pub fn new(pair: &str, value: u64) -> Self {
        Self {
            pair: pair.to_string(),
            value,
        }
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.pair, self.value)
    }
}

/// Single-pair ticker response, e.g. `{"result": {"price": "0.0000635"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerResponse {
    #[serde(default)]
    pub result: Option<TickerResult>,
}

impl TickerResponse {
    pub fn with_price(price: &str) -> Self {
        Self {
            result: Some(TickerResult {
                price: PriceField::Text(price.to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerResult {
    #[serde(default)]
    pub price: PriceField,
}

/// Exchanges disagree on whether prices are JSON strings or numbers.
///
/// Anything else (null, objects, a missing field) lands in `Other` and is
/// treated as unparsable instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(f64),
    Other(serde_json::Value),
}

impl Default for PriceField {
    fn default() -> Self {
        PriceField::Other(serde_json::Value::Null)
    }
}

impl PriceField {
    /// Numeric value, or `None` when the field is not a valid price
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PriceField::Text(s) => crate::oracle::scaling::parse_decimal(s),
            PriceField::Number(n) => crate::oracle::scaling::finite_price(*n),
            PriceField::Other(_) => None,
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceField::Text(s) => f.write_str(s),
            PriceField::Number(n) => write!(f, "{}", n),
            PriceField::Other(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_quote_ignores_extra_fields() {
        let json = r#"{
            "symbol": "WAXP-BTC",
            "high": "0.000004400000",
            "low": "0.000004320000",
            "volume": "23937.59634439",
            "quoteVolume": "0.10429560",
            "percentChange": "0.92",
            "updatedAt": "2022-09-29T14:29:00.41Z"
        }"#;
        let quote: RawExchangeQuote = serde_json::from_str(json).unwrap();
        assert_eq!(quote, RawExchangeQuote::new("WAXP-BTC", "0.000004400000", "0.000004320000"));
    }

    #[test]
    fn test_pair_metadata_from_table_row() {
        let json = r#"{
            "active": 1,
            "bounty_awarded": 1,
            "proposer": "nate",
            "name": "waxpusd",
            "approving_custodians": ["alohaeosprod"],
            "base_symbol": "8,WAXP",
            "base_type": 4,
            "quote_symbol": "2,USD",
            "quote_type": 1,
            "quoted_precision": 4
        }"#;
        let meta: PairMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.is_active());
        assert_eq!(meta.quoted_precision, 4);
        assert_eq!(meta.quote_symbol, "2,USD");
    }

    #[test]
    fn test_ticker_price_string_or_number() {
        let text: TickerResponse =
            serde_json::from_str(r#"{"result":{"price":"0.12345678"}}"#).unwrap();
        let number: TickerResponse =
            serde_json::from_str(r#"{"result":{"price":0.12345678},"allowance":{"cost":0.005}}"#)
                .unwrap();

        let a = text.result.unwrap().price.as_f64();
        let b = number.result.unwrap().price.as_f64();
        assert_eq!(a, Some(0.12345678));
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_bounds_still_deserialize() {
        let json = r#"[
            {"symbol":"XYZ-USD","low":"1.0"},
            {"symbol":"ABC-BTC","high":null,"low":2.5}
        ]"#;
        let quotes: Vec<RawExchangeQuote> = serde_json::from_str(json).unwrap();

        assert_eq!(quotes[0].high.as_f64(), None);
        assert_eq!(quotes[0].low.as_f64(), Some(1.0));
        assert_eq!(quotes[1].high, PriceField::Other(serde_json::Value::Null));
        assert_eq!(quotes[1].low.as_f64(), Some(2.5));
    }

    #[test]
    fn test_ticker_without_result() {
        let resp: TickerResponse = serde_json::from_str(r#"{"error":"Route not found"}"#).unwrap();
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_quote_record_wire_shape() {
        let json = serde_json::to_value(QuoteRecord::new("waxpbtc", 436)).unwrap();
        assert_eq!(json, serde_json::json!({"pair": "waxpbtc", "value": 436}));
    }
}
