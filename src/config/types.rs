//! Configuration section types

use serde::Deserialize;
use std::collections::HashMap;

use crate::oracle::SymbolOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct FeederConfig {
    /// Seconds between polling cycles
    pub interval_secs: u64,
    /// Pairs each batch attempts to include
    pub required_pairs: Vec<String>,
    /// Log batches instead of pushing transactions
    pub dry_run: bool,
    /// Emit JSON log lines
    pub log_json: bool,
    /// HTTP timeout for exchange and chain requests
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Chain API endpoint (nodeos)
    pub endpoint: String,
    /// Wallet API endpoint (keosd)
    pub wallet_url: String,
    /// Oracle account pushing quotes
    pub account: String,
    /// Permission used to sign `write`
    pub permission: String,
    /// Public key of the signing key held by the wallet
    pub public_key: String,
    /// Reference block distance from head
    pub blocks_behind: u32,
    /// Transaction expiration in seconds
    pub expire_seconds: u32,
    /// Row limit for the `pairs` table read
    pub pairs_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesConfig {
    pub bittrex: SummaryExchangeConfig,
    pub gateio: TickerExchangeConfig,
}

/// Exchange polled for a multi-pair summary
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryExchangeConfig {
    pub url: String,
    /// Substring a market symbol must contain to be kept
    pub market_filter: String,
    /// Separator between assets in exchange symbols
    pub separator: char,
    pub symbol_order: SymbolOrder,
    /// Digit corrections per canonical pair
    #[serde(default)]
    pub precision_adjustments: HashMap<String, i32>,
}

/// Exchange polled for a single pair
#[derive(Debug, Clone, Deserialize)]
pub struct TickerExchangeConfig {
    pub enabled: bool,
    pub url: String,
    pub pair: String,
    pub precision: u32,
}
