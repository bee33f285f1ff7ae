//! Quote batch submission to `delphioracle::write`

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::rpc::{ChainClient, WalletClient};
use super::types::{Action, PermissionLevel, Transaction};
use super::{QuoteSubmitter, DELPHI_CONTRACT, WRITE_ACTION};
use crate::oracle::QuoteBatch;
use crate::types::QuoteRecord;

/// Who signs the `write` action and how the transaction is anchored
#[derive(Debug, Clone)]
pub struct SignerConfig {
    pub account: String,
    pub permission: String,
    /// Public key of the wallet key that signs for `account@permission`
    pub public_key: String,
    /// Reference block distance from head
    pub blocks_behind: u32,
    /// Seconds after the reference block before the transaction expires
    pub expire_seconds: u32,
}

/// `write` action arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteArgs<'a> {
    pub owner: &'a str,
    pub quotes: &'a [QuoteRecord],
}

pub struct DelphiSubmitter {
    chain: Arc<ChainClient>,
    wallet: WalletClient,
    signer: SignerConfig,
}

impl DelphiSubmitter {
    pub fn new(chain: Arc<ChainClient>, wallet: WalletClient, signer: SignerConfig) -> Self {
        Self {
            chain,
            wallet,
            signer,
        }
    }

    fn authorization(&self) -> Vec<PermissionLevel> {
        vec![PermissionLevel {
            actor: self.signer.account.clone(),
            permission: self.signer.permission.clone(),
        }]
    }

    async fn build_transaction(&self, batch: &QuoteBatch) -> Result<(Transaction, String)> {
        let info = self.chain.get_info().await?;
        let ref_num = info.head_block_num.saturating_sub(self.signer.blocks_behind);
        let block = self.chain.get_block(ref_num).await?;

        let args = WriteArgs {
            owner: &self.signer.account,
            quotes: batch.records(),
        };
        let data = self
            .chain
            .abi_json_to_bin(DELPHI_CONTRACT, WRITE_ACTION, &args)
            .await?;

        let action = Action {
            account: DELPHI_CONTRACT.to_string(),
            name: WRITE_ACTION.to_string(),
            authorization: self.authorization(),
            data,
        };

        let trx = Transaction::new(&block, self.signer.expire_seconds, vec![action])?;
        Ok((trx, info.chain_id))
    }

    async fn push(&self, batch: &QuoteBatch) -> Result<String> {
        let (trx, chain_id) = self.build_transaction(batch).await?;
        let signed = self
            .wallet
            .sign_transaction(&trx, std::slice::from_ref(&self.signer.public_key), &chain_id)
            .await?;
        self.chain.push_transaction(signed).await
    }
}

#[async_trait]
impl QuoteSubmitter for DelphiSubmitter {
    async fn submit(&self, batch: &QuoteBatch) -> Result<String> {
        let tx_id = self
            .push(batch)
            .await
            .context("Error pushing pairs to delphioracle contract")?;

        tracing::info!(
            tx_id = %tx_id,
            owner = %self.signer.account,
            quotes = batch.len(),
            "Pushed transaction"
        );
        Ok(tx_id)
    }
}

/// Logs batches instead of submitting them
#[derive(Debug, Clone, Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl QuoteSubmitter for DryRunSubmitter {
    async fn submit(&self, batch: &QuoteBatch) -> Result<String> {
        let quotes = serde_json::to_string(batch).context("Failed to serialize quote batch")?;
        tracing::info!(quotes = %quotes, "Dry run, not submitting");
        Ok("dry-run".to_string())
    }
}
