//! Configuration management for the feeder
//!
//! Loads from optional config files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::oracle::sources::{BITTREX_SUMMARIES_URL, CRYPTOWATCH_GATEIO_WAXPETH_URL};
use crate::oracle::{DEFAULT_TICKER_PAIR, DEFAULT_TICKER_PRECISION};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub feeder: FeederConfig,
    pub chain: ChainConfig,
    pub exchanges: ExchangesConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (DELPHI_FEEDER_*)
            .add_source(
                Environment::with_prefix("DELPHI_FEEDER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("feeder.required_pairs")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Builder pre-populated with every default
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            // Feeder defaults
            .set_default("feeder.interval_secs", 120)?
            .set_default("feeder.required_pairs", vec!["waxpbtc", "waxpeth", "waxpusd"])?
            .set_default("feeder.dry_run", false)?
            .set_default("feeder.log_json", false)?
            .set_default("feeder.http_timeout_secs", 30)?
            // Chain defaults
            .set_default("chain.endpoint", "https://wax.greymass.com")?
            .set_default("chain.wallet_url", "http://127.0.0.1:8900")?
            .set_default("chain.account", "")?
            .set_default("chain.permission", "active")?
            .set_default("chain.public_key", "")?
            .set_default("chain.blocks_behind", 3)?
            .set_default("chain.expire_seconds", 30)?
            .set_default("chain.pairs_limit", 100)?
            // Bittrex defaults
            .set_default("exchanges.bittrex.url", BITTREX_SUMMARIES_URL)?
            .set_default("exchanges.bittrex.market_filter", "WAXP")?
            .set_default("exchanges.bittrex.separator", "-")?
            .set_default("exchanges.bittrex.symbol_order", "base_quote")?
            // gate.io via Cryptowatch defaults
            .set_default("exchanges.gateio.enabled", true)?
            .set_default("exchanges.gateio.url", CRYPTOWATCH_GATEIO_WAXPETH_URL)?
            .set_default("exchanges.gateio.pair", DEFAULT_TICKER_PAIR)?
            .set_default("exchanges.gateio.precision", DEFAULT_TICKER_PRECISION)?;
        Ok(builder)
    }

    /// Configuration with defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self> {
        Self::builder()?
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.feeder.interval_secs.max(1))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.feeder.http_timeout_secs.max(1))
    }

    /// Generate a digest of the config (without secrets) for logging
    pub fn digest(&self) -> String {
        format!(
            "account={}@{} endpoint={} pairs={:?} interval={}s dry_run={} gateio={}",
            self.chain.account,
            self.chain.permission,
            self.chain.endpoint,
            self.feeder.required_pairs,
            self.feeder.interval_secs,
            self.feeder.dry_run,
            self.exchanges.gateio.enabled
        )
    }

    /// Validate settings needed to push transactions
    pub fn validate(&self) -> Result<()> {
        if self.feeder.required_pairs.is_empty() {
            bail!("feeder.required_pairs must list at least one pair");
        }

        if self.feeder.dry_run {
            return Ok(());
        }

        let required = [
            ("chain.account", &self.chain.account),
            ("chain.permission", &self.chain.permission),
            ("chain.public_key", &self.chain.public_key),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                bail!("{} must be set unless feeder.dry_run is enabled", key);
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::SymbolOrder;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::defaults().unwrap();
        assert_eq!(cfg.feeder.interval_secs, 120);
        assert_eq!(cfg.feeder.required_pairs, vec!["waxpbtc", "waxpeth", "waxpusd"]);
        assert_eq!(cfg.chain.blocks_behind, 3);
        assert_eq!(cfg.chain.expire_seconds, 30);
        assert_eq!(cfg.exchanges.bittrex.separator, '-');
        assert_eq!(cfg.exchanges.bittrex.symbol_order, SymbolOrder::BaseQuote);
        assert!(cfg.exchanges.bittrex.precision_adjustments.is_empty());
        assert_eq!(cfg.exchanges.gateio.pair, "waxpeth");
        assert_eq!(cfg.exchanges.gateio.precision, 8);
        assert_eq!(cfg.interval(), Duration::from_secs(120));
    }

    #[test]
    fn test_validate_requires_signer() {
        let mut cfg = AppConfig::defaults().unwrap();
        assert!(cfg.validate().is_err());

        cfg.feeder.dry_run = true;
        assert!(cfg.validate().is_ok());

        cfg.feeder.dry_run = false;
        cfg.chain.account = "feeder.wam".to_string();
        cfg.chain.public_key = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63".to_string();
        assert!(cfg.validate().is_ok());

        cfg.feeder.required_pairs.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_digest_has_no_key() {
        let mut cfg = AppConfig::defaults().unwrap();
        cfg.chain.public_key = "PUB_K1_secretish".to_string();
        assert!(!cfg.digest().contains("PUB_K1"));
        assert!(cfg.to_string().contains("interval=120s"));
    }
}
