//! Sui JSON-RPC access.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, trace};
use url::Url;

use crate::{
    config::{ChainConfig, RPC_PAGE_LIMIT},
    contracts::MoveCall,
    error::{Error, Result},
    object::{
        ExecutedTransaction, ObjectData, ObjectResponse, Page, TransactionBlock,
        TransactionBytes, TransactionFilter,
    },
};

/// The fullnode calls ClubChain needs.
#[async_trait]
pub trait SuiRpc: Send + Sync {
    /// `sui_getObject` with content, type and owner. `None` if the object does not exist.
    async fn get_object(&self, object_id: &str) -> Result<Option<ObjectData>>;

    /// `sui_multiGetObjects` with content, type and owner. Missing objects are skipped.
    async fn multi_get_objects(&self, object_ids: &[String]) -> Result<Vec<ObjectData>>;

    /// One page of `suix_getOwnedObjects` filtered by struct type.
    async fn get_owned_objects(
        &self, owner: &str, struct_type: &str, cursor: Option<Value>,
    ) -> Result<Page<ObjectResponse>>;

    /// One page of `suix_queryTransactionBlocks` with object changes.
    async fn query_transaction_blocks(
        &self, filter: &TransactionFilter, cursor: Option<Value>, descending: bool,
    ) -> Result<Page<TransactionBlock>>;

    /// `unsafe_moveCall`: build unsigned transaction bytes for `signer`.
    async fn move_call(
        &self, signer: &str, call: &MoveCall, gas_budget: u64,
    ) -> Result<TransactionBytes>;

    /// `sui_executeTransactionBlock` for wallet signed bytes.
    async fn execute_transaction_block(
        &self, tx_bytes: &str, signatures: &[String],
    ) -> Result<ExecutedTransaction>;
}

/// Options requesting everything the parsers read.
fn object_options() -> Value {
    json!({ "showType": true, "showOwner": true, "showContent": true })
}

/// JSON-RPC 2.0 client over HTTP.
#[derive(Debug)]
pub struct JsonRpcClient {
    /// HTTP client, carries the request timeout.
    http: reqwest::Client,
    /// Fullnode endpoint.
    url: Url,
    /// Next JSON-RPC request id.
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Client for `url` with a per request timeout.
    ///
    /// # Errors
    ///
    /// If the HTTP client cannot be built (TLS backend initialisation).
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| {
                Error::Http {
                    url: url.to_string(),
                    source,
                }
            })?;
        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Client for the configured fullnode.
    ///
    /// # Errors
    ///
    /// See [`JsonRpcClient::new`] and [`ChainConfig::fullnode_url`].
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        Self::new(config.fullnode_url()?, config.rpc_timeout)
    }

    /// Fullnode endpoint.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Perform one JSON-RPC call and decode its `result`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(id, method, "sending rpc request");

        let http_err = |source| {
            Error::Http {
                url: self.url.to_string(),
                source,
            }
        };
        let response: Value = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(http_err)?
            .json()
            .await
            .map_err(http_err)?;

        if let Some(error) = response.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            debug!(id, method, code, %message, "rpc returned an error");
            return Err(Error::Rpc {
                method: method.to_string(),
                code,
                message,
            });
        }

        let result = response
            .get("result")
            .cloned()
            .ok_or_else(|| Error::decode(method, "response has neither result nor error"))?;
        serde_json::from_value(result).map_err(|e| Error::decode(method, e))
    }
}

#[async_trait]
impl SuiRpc for JsonRpcClient {
    async fn get_object(&self, object_id: &str) -> Result<Option<ObjectData>> {
        let response: ObjectResponse = self
            .call("sui_getObject", json!([object_id, object_options()]))
            .await?;
        Ok(response.into_data())
    }

    async fn multi_get_objects(&self, object_ids: &[String]) -> Result<Vec<ObjectData>> {
        let mut objects = Vec::with_capacity(object_ids.len());
        for chunk in object_ids.chunks(RPC_PAGE_LIMIT) {
            let responses: Vec<ObjectResponse> = self
                .call("sui_multiGetObjects", json!([chunk, object_options()]))
                .await?;
            objects.extend(responses.into_iter().filter_map(ObjectResponse::into_data));
        }
        Ok(objects)
    }

    async fn get_owned_objects(
        &self, owner: &str, struct_type: &str, cursor: Option<Value>,
    ) -> Result<Page<ObjectResponse>> {
        let query = json!({
            "filter": { "StructType": struct_type },
            "options": object_options(),
        });
        self.call(
            "suix_getOwnedObjects",
            json!([owner, query, cursor, RPC_PAGE_LIMIT]),
        )
        .await
    }

    async fn query_transaction_blocks(
        &self, filter: &TransactionFilter, cursor: Option<Value>, descending: bool,
    ) -> Result<Page<TransactionBlock>> {
        let query = json!({
            "filter": filter,
            "options": { "showObjectChanges": true },
        });
        self.call(
            "suix_queryTransactionBlocks",
            json!([query, cursor, RPC_PAGE_LIMIT, descending]),
        )
        .await
    }

    async fn move_call(
        &self, signer: &str, call: &MoveCall, gas_budget: u64,
    ) -> Result<TransactionBytes> {
        let arguments: Vec<Value> = call.arguments.iter().map(|a| a.to_json()).collect();
        self.call(
            "unsafe_moveCall",
            json!([
                signer,
                call.package,
                call.module,
                call.function,
                call.type_arguments,
                arguments,
                Value::Null,
                gas_budget.to_string(),
            ]),
        )
        .await
    }

    async fn execute_transaction_block(
        &self, tx_bytes: &str, signatures: &[String],
    ) -> Result<ExecutedTransaction> {
        self.call(
            "sui_executeTransactionBlock",
            json!([
                tx_bytes,
                signatures,
                { "showEffects": true },
                "WaitForLocalExecution",
            ]),
        )
        .await
    }
}
