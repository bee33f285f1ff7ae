//! Chain and wallet API wire types

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// `/v1/chain/get_info` (fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    pub chain_id: String,
    pub head_block_num: u32,
}

/// `/v1/chain/get_block` (fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct BlockInfo {
    pub block_num: u32,
    pub ref_block_prefix: u32,
    /// e.g. "2022-09-29T14:29:00.500"
    pub timestamp: String,
}

/// `/v1/chain/get_table_rows` response
#[derive(Debug, Clone, Deserialize)]
pub struct TableRows<T> {
    pub rows: Vec<T>,
    #[serde(default)]
    pub more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRowsRequest<'a> {
    pub json: bool,
    pub code: &'a str,
    pub scope: &'a str,
    pub table: &'a str,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbiJsonToBinRequest<'a, T: Serialize> {
    pub code: &'a str,
    pub action: &'a str,
    pub args: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiJsonToBinResponse {
    pub binargs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub account: String,
    pub name: String,
    pub authorization: Vec<PermissionLevel>,
    /// Hex-encoded serialized action data
    pub data: String,
}

/// Unsigned transaction in the JSON form accepted by keosd and nodeos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub expiration: String,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
    pub context_free_actions: Vec<Action>,
    pub actions: Vec<Action>,
    pub transaction_extensions: Vec<serde_json::Value>,
}

impl Transaction {
    /// TaPoS header referencing `block`, expiring `expire_seconds` after it
    pub fn new(block: &BlockInfo, expire_seconds: u32, actions: Vec<Action>) -> anyhow::Result<Self> {
        Ok(Self {
            expiration: expiration_after(&block.timestamp, expire_seconds)?,
            ref_block_num: (block.block_num & 0xffff) as u16,
            ref_block_prefix: block.ref_block_prefix,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
            context_free_actions: Vec::new(),
            actions,
            transaction_extensions: Vec::new(),
        })
    }
}

/// Transaction returned by the wallet's `sign_transaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PushTransactionRequest {
    pub signatures: Vec<String>,
    pub compression: &'static str,
    pub packed_context_free_data: String,
    pub transaction: Transaction,
}

impl From<SignedTransaction> for PushTransactionRequest {
    fn from(signed: SignedTransaction) -> Self {
        Self {
            signatures: signed.signatures,
            compression: "none",
            packed_context_free_data: String::new(),
            transaction: signed.transaction,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushTransactionResponse {
    pub transaction_id: String,
}

/// Error body returned by nodeos on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ChainApiError {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub error: Option<ChainApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainApiErrorDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ChainApiError {
    pub fn summary(&self) -> String {
        match &self.error {
            Some(detail) => {
                let first = detail
                    .details
                    .first()
                    .and_then(|d| d.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("");
                format!("{} ({}): {} {}", self.message, self.code, detail.what, first)
                    .trim_end()
                    .to_string()
            }
            None => format!("{} ({})", self.message, self.code),
        }
    }
}

const CHAIN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn expiration_after(block_timestamp: &str, expire_seconds: u32) -> anyhow::Result<String> {
    use anyhow::Context;

    let ts = NaiveDateTime::parse_from_str(block_timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("Invalid block timestamp {}", block_timestamp))?;
    let expiration = ts + Duration::seconds(i64::from(expire_seconds));
    Ok(expiration.format(CHAIN_TIME_FORMAT).to_string())
}
