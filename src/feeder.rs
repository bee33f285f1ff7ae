//! Polling loop: fetch -> normalize -> submit
//!
//! `FeederContext` is built once at startup and owns every long-lived
//! collaborator. Each tick of the `Scheduler` runs one cycle; a failed cycle
//! is logged and the loop moves on to the next tick.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::chain::{
    ChainClient, DelphiPairsReader, DelphiSubmitter, DryRunSubmitter, PairMetadataSource,
    QuoteSubmitter, SignerConfig, WalletClient,
};
use crate::config::AppConfig;
use crate::oracle::sources::{BittrexClient, CryptowatchClient, SummarySource, TickerSource};
use crate::oracle::{
    ExchangeSummaryNormalizer, PrecisionOverrides, QuoteBatch, SinglePairQuoteExtractor,
};

/// Drives polling cycles
#[async_trait]
pub trait Scheduler: Send {
    /// Wait for the next cycle. `false` stops the loop.
    async fn tick(&mut self) -> bool;
}

/// Fires immediately, then every `period`
pub struct IntervalScheduler {
    interval: Interval,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Scheduler for IntervalScheduler {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Outcome of one polling cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    Submitted { tx_id: String, quotes: usize },
    /// Nothing to push this cycle
    Skipped,
}

pub struct FeederContext {
    summaries: Box<dyn SummarySource>,
    ticker: Option<Box<dyn TickerSource>>,
    pairs: Box<dyn PairMetadataSource>,
    submitter: Box<dyn QuoteSubmitter>,
    normalizer: ExchangeSummaryNormalizer,
    extractor: SinglePairQuoteExtractor,
    required_pairs: Vec<String>,
}

impl FeederContext {
    pub fn new(
        summaries: Box<dyn SummarySource>,
        pairs: Box<dyn PairMetadataSource>,
        submitter: Box<dyn QuoteSubmitter>,
        required_pairs: Vec<String>,
    ) -> Self {
        Self {
            summaries,
            ticker: None,
            pairs,
            submitter,
            normalizer: ExchangeSummaryNormalizer::default(),
            extractor: SinglePairQuoteExtractor::default(),
            required_pairs,
        }
    }

    pub fn with_ticker(
        mut self,
        ticker: Box<dyn TickerSource>,
        extractor: SinglePairQuoteExtractor,
    ) -> Self {
        self.ticker = Some(ticker);
        self.extractor = extractor;
        self
    }

    pub fn with_normalizer(mut self, normalizer: ExchangeSummaryNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Wire HTTP sources, the chain reader and the submitter from config
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let timeout = cfg.http_timeout();

        let bittrex = &cfg.exchanges.bittrex;
        let summaries = BittrexClient::new(&bittrex.url, &bittrex.market_filter, timeout)?;
        let normalizer = ExchangeSummaryNormalizer::new(
            bittrex.symbol_order.mapper(bittrex.separator),
        )
        .with_overrides(PrecisionOverrides::from(bittrex.precision_adjustments.clone()));

        let chain = Arc::new(ChainClient::new(&cfg.chain.endpoint, timeout)?);
        let pairs = DelphiPairsReader::new(Arc::clone(&chain), cfg.chain.pairs_limit);

        let submitter: Box<dyn QuoteSubmitter> = if cfg.feeder.dry_run {
            Box::new(DryRunSubmitter)
        } else {
            let wallet = WalletClient::new(&cfg.chain.wallet_url, timeout)?;
            let signer = SignerConfig {
                account: cfg.chain.account.clone(),
                permission: cfg.chain.permission.clone(),
                public_key: cfg.chain.public_key.clone(),
                blocks_behind: cfg.chain.blocks_behind,
                expire_seconds: cfg.chain.expire_seconds,
            };
            Box::new(DelphiSubmitter::new(chain, wallet, signer))
        };

        let mut ctx = Self::new(
            Box::new(summaries),
            Box::new(pairs),
            submitter,
            cfg.feeder.required_pairs.clone(),
        )
        .with_normalizer(normalizer);

        let gateio = &cfg.exchanges.gateio;
        if gateio.enabled {
            let ticker = CryptowatchClient::new(&gateio.url, timeout)?;
            ctx = ctx.with_ticker(
                Box::new(ticker),
                SinglePairQuoteExtractor::new(&gateio.pair, gateio.precision),
            );
        }

        Ok(ctx)
    }

    /// Build this cycle's batch without submitting it
    pub async fn collect_quotes(&self) -> Result<QuoteBatch> {
        let raw = self
            .summaries
            .fetch_summaries()
            .await
            .with_context(|| format!("Failed to fetch {} summaries", self.summaries.name()))?;
        let pairs = self.pairs.fetch_pairs().await?;

        let normalized = self.normalizer.normalize(
            raw.as_deref(),
            Some(&pairs),
            Some(self.required_pairs.as_slice()),
        )?;

        let single = match &self.ticker {
            Some(source) => {
                let ticker = source
                    .fetch_ticker()
                    .await
                    .with_context(|| format!("Failed to fetch {} ticker", source.name()))?;
                self.extractor.extract_single(ticker.as_ref())
            }
            None => None,
        };

        Ok(QuoteBatch::assemble(normalized, single))
    }

    /// One polling cycle
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let batch = self.collect_quotes().await?;

        if batch.is_empty() {
            tracing::warn!(required = ?self.required_pairs, "No quotes to submit this cycle");
            return Ok(CycleReport::Skipped);
        }

        tracing::debug!(pairs = ?batch.pairs(), "Submitting quotes");
        let tx_id = self.submitter.submit(&batch).await?;

        Ok(CycleReport::Submitted {
            tx_id,
            quotes: batch.len(),
        })
    }

    /// Run cycles until the scheduler stops. Cycle errors never escape.
    pub async fn run<S: Scheduler>(&self, scheduler: &mut S) {
        while scheduler.tick().await {
            match self.run_cycle().await {
                Ok(CycleReport::Submitted { tx_id, quotes }) => {
                    tracing::info!(tx_id = %tx_id, quotes, "Cycle complete");
                }
                Ok(CycleReport::Skipped) => {}
                Err(e) => {
                    tracing::error!(error = %format!("{:#}", e), "Cycle failed");
                }
            }
        }
    }
}
