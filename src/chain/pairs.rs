use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::rpc::ChainClient;
use super::types::TableRows;
use super::{PairMetadataSource, DELPHI_CONTRACT, PAIRS_TABLE};
use crate::oracle::PairMetadataStore;
use crate::types::PairMetadata;

/// Reads `delphioracle::pairs`, keeping active rows only
pub struct DelphiPairsReader {
    chain: Arc<ChainClient>,
    limit: u32,
}

impl DelphiPairsReader {
    pub fn new(chain: Arc<ChainClient>, limit: u32) -> Self {
        Self { chain, limit }
    }

    fn build_store(&self, table: TableRows<PairMetadata>) -> PairMetadataStore {
        if table.more {
            tracing::warn!(
                limit = self.limit,
                "pairs table has more rows than the configured limit"
            );
        }
        let total = table.rows.len();
        let store = PairMetadataStore::from_rows(table.rows);
        tracing::debug!(total, active = store.len(), "Loaded oracle pairs");
        store
    }
}

#[async_trait]
impl PairMetadataSource for DelphiPairsReader {
    async fn fetch_pairs(&self) -> Result<PairMetadataStore> {
        let table: TableRows<PairMetadata> = self
            .chain
            .get_table_rows(DELPHI_CONTRACT, DELPHI_CONTRACT, PAIRS_TABLE, self.limit)
            .await
            .context("Error fetching pairs from delphioracle")?;

        Ok(self.build_store(table))
    }
}
