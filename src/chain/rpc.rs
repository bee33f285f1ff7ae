//! Chain node and wallet HTTP clients
//!
//! Endpoints: nodeos `/v1/chain/*` and keosd `/v1/wallet/*`. Both speak
//! JSON over POST.

use anyhow::{bail, Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::types::{
    AbiJsonToBinRequest, AbiJsonToBinResponse, BlockInfo, ChainApiError, ChainInfo,
    PushTransactionRequest, PushTransactionResponse, SignedTransaction, TableRows,
    TableRowsRequest, Transaction,
};

fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .context("Failed to create HTTP client")
}

async fn post_json<B, T>(client: &Client, url: &str, body: &B) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("Failed POST {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ChainApiError>(&text) {
            Ok(api_err) => bail!("POST {} failed: {}", url, api_err.summary()),
            Err(_) => bail!("POST {} failed: {} [{}]", url, status, text),
        }
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed parsing response of {}", url))
}

/// Chain API client (nodeos)
pub struct ChainClient {
    client: Client,
    base_url: String,
}

impl ChainClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/chain/{}", self.base_url, path)
    }

    pub async fn get_info(&self) -> Result<ChainInfo> {
        post_json(&self.client, &self.url("get_info"), &serde_json::json!({})).await
    }

    pub async fn get_block(&self, block_num: u32) -> Result<BlockInfo> {
        let body = serde_json::json!({ "block_num_or_id": block_num });
        post_json(&self.client, &self.url("get_block"), &body).await
    }

    pub async fn get_table_rows<T: DeserializeOwned>(
        &self,
        code: &str,
        scope: &str,
        table: &str,
        limit: u32,
    ) -> Result<TableRows<T>> {
        let body = TableRowsRequest {
            json: true,
            code,
            scope,
            table,
            limit,
        };
        post_json(&self.client, &self.url("get_table_rows"), &body).await
    }

    /// Serialize action arguments with the contract's ABI, returning hex
    pub async fn abi_json_to_bin<A: Serialize>(
        &self,
        code: &str,
        action: &str,
        args: A,
    ) -> Result<String> {
        let body = AbiJsonToBinRequest { code, action, args };
        let res: AbiJsonToBinResponse =
            post_json(&self.client, &self.url("abi_json_to_bin"), &body).await?;
        Ok(res.binargs)
    }

    pub async fn push_transaction(&self, signed: SignedTransaction) -> Result<String> {
        let body = PushTransactionRequest::from(signed);
        let res: PushTransactionResponse =
            post_json(&self.client, &self.url("push_transaction"), &body).await?;
        Ok(res.transaction_id)
    }
}

/// Wallet API client (keosd). Keys never leave the wallet.
pub struct WalletClient {
    client: Client,
    base_url: String,
}

impl WalletClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn sign_transaction(
        &self,
        transaction: &Transaction,
        public_keys: &[String],
        chain_id: &str,
    ) -> Result<SignedTransaction> {
        let url = format!("{}/v1/wallet/sign_transaction", self.base_url);
        let body = serde_json::json!([transaction, public_keys, chain_id]);
        post_json(&self.client, &url, &body).await
    }
}
