//! Chain module - delphioracle contract access
//!
//! Reads registered pairs from the contract's `pairs` table and pushes quote
//! batches through its `write` action.

mod pairs;
mod rpc;
mod submitter;
pub mod types;

pub use pairs::DelphiPairsReader;
pub use rpc::{ChainClient, WalletClient};
pub use submitter::{DelphiSubmitter, DryRunSubmitter, SignerConfig};

use anyhow::Result;
use async_trait::async_trait;

use crate::oracle::{PairMetadataStore, QuoteBatch};

/// Oracle contract account
pub const DELPHI_CONTRACT: &str = "delphioracle";
/// Table holding registered pairs
pub const PAIRS_TABLE: &str = "pairs";
/// Action accepting quote batches
pub const WRITE_ACTION: &str = "write";

/// Source of the contract's registered pairs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PairMetadataSource: Send + Sync {
    async fn fetch_pairs(&self) -> Result<PairMetadataStore>;
}

/// Destination of assembled quote batches
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    /// Submit the batch, returning the transaction id
    async fn submit(&self, batch: &QuoteBatch) -> Result<String>;
}
