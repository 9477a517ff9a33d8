//! In-memory [`SuiRpc`] for tests of this crate and its dependents.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::RPC_PAGE_LIMIT,
    contracts::{CallArg, MoveCall},
    error::{Error, Result},
    object::{
        ExecutedTransaction, ObjectData, ObjectResponse, Page, TransactionBlock,
        TransactionBytes, TransactionFilter,
    },
    rpc::SuiRpc,
};

/// Objects, owned objects and transactions served from memory.
#[derive(Debug, Default)]
pub struct FakeRpc {
    /// Objects by id.
    objects: HashMap<String, ObjectData>,
    /// Objects by owner address.
    owned: HashMap<String, Vec<ObjectData>>,
    /// Transaction history, served in order.
    transactions: Vec<TransactionBlock>,
    /// Owned object struct types whose queries fail.
    failing_owned_types: HashSet<String>,
    /// Transaction page index that fails.
    failing_transaction_page: Option<usize>,
    /// Whether batch object reads fail.
    failing_multi_get: bool,
    /// Number of owned object queries served.
    owned_queries: AtomicUsize,
    /// Number of transaction queries served.
    transaction_queries: AtomicUsize,
    /// Move calls built, with their signer.
    move_calls: Mutex<Vec<(String, MoveCall)>>,
}

impl FakeRpc {
    /// Add an object given in `sui_getObject` `data` form.
    ///
    /// # Panics
    ///
    /// If `object` is not a valid object.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_object(mut self, object: Value) -> Self {
        let object: ObjectData = serde_json::from_value(object).expect("valid object json");
        self.objects.insert(object.object_id.clone(), object);
        self
    }

    /// Add an object owned by `owner`. It is also readable by id.
    ///
    /// # Panics
    ///
    /// If `object` is not a valid object.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_owned(mut self, owner: &str, object: Value) -> Self {
        let object: ObjectData = serde_json::from_value(object).expect("valid object json");
        self.objects.insert(object.object_id.clone(), object.clone());
        self.owned.entry(owner.to_string()).or_default().push(object);
        self
    }

    /// Set the transaction history, newest first.
    ///
    /// # Panics
    ///
    /// If an entry is not a valid transaction block.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_transactions(mut self, transactions: Vec<Value>) -> Self {
        self.transactions = transactions
            .into_iter()
            .map(|tx| serde_json::from_value(tx).expect("valid transaction json"))
            .collect();
        self
    }

    /// Make owned object queries for `struct_type` fail.
    #[must_use]
    pub fn failing_owned_type(mut self, struct_type: String) -> Self {
        self.failing_owned_types.insert(struct_type);
        self
    }

    /// Make the transaction page with this index fail.
    #[must_use]
    pub fn failing_transaction_page(mut self, page: usize) -> Self {
        self.failing_transaction_page = Some(page);
        self
    }

    /// Make batch object reads fail.
    #[must_use]
    pub fn failing_multi_get(mut self) -> Self {
        self.failing_multi_get = true;
        self
    }

    /// Owned object queries served so far.
    pub fn owned_queries(&self) -> usize {
        self.owned_queries.load(Ordering::SeqCst)
    }

    /// Transaction queries served so far.
    pub fn transaction_queries(&self) -> usize {
        self.transaction_queries.load(Ordering::SeqCst)
    }

    /// Move calls built so far.
    pub fn move_calls(&self) -> Vec<(String, MoveCall)> {
        self.move_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

/// Offset encoded in a cursor.
fn offset(cursor: Option<&Value>) -> usize {
    cursor
        .and_then(Value::as_str)
        .and_then(|c| c.parse().ok())
        .unwrap_or_default()
}

/// One page of `items` starting at `cursor`.
fn page_of<T: Clone>(items: &[T], cursor: Option<&Value>) -> Page<T> {
    let start = offset(cursor).min(items.len());
    let end = (start + RPC_PAGE_LIMIT).min(items.len());
    Page {
        data: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        next_cursor: (end < items.len()).then(|| Value::String(end.to_string())),
        has_next_page: end < items.len(),
    }
}

/// Error returned by injected failures.
fn injected(method: &str) -> Error {
    Error::Rpc {
        method: method.to_string(),
        code: -32000,
        message: "injected failure".to_string(),
    }
}

#[async_trait]
impl SuiRpc for FakeRpc {
    async fn get_object(&self, object_id: &str) -> Result<Option<ObjectData>> {
        Ok(self.objects.get(object_id).cloned())
    }

    async fn multi_get_objects(&self, object_ids: &[String]) -> Result<Vec<ObjectData>> {
        if self.failing_multi_get {
            return Err(injected("sui_multiGetObjects"));
        }
        Ok(object_ids
            .iter()
            .filter_map(|id| self.objects.get(id).cloned())
            .collect())
    }

    async fn get_owned_objects(
        &self, owner: &str, struct_type: &str, cursor: Option<Value>,
    ) -> Result<Page<ObjectResponse>> {
        self.owned_queries.fetch_add(1, Ordering::SeqCst);
        if self.failing_owned_types.contains(struct_type) {
            return Err(injected("suix_getOwnedObjects"));
        }
        let matching: Vec<ObjectResponse> = self
            .owned
            .get(owner)
            .into_iter()
            .flatten()
            .filter(|o| o.move_type() == Some(struct_type))
            .map(|o| {
                ObjectResponse {
                    data: Some(o.clone()),
                    error: None,
                }
            })
            .collect();
        Ok(page_of(&matching, cursor.as_ref()))
    }

    async fn query_transaction_blocks(
        &self, _filter: &TransactionFilter, cursor: Option<Value>, _descending: bool,
    ) -> Result<Page<TransactionBlock>> {
        let page_no = self.transaction_queries.fetch_add(1, Ordering::SeqCst);
        if self.failing_transaction_page == Some(page_no) {
            return Err(injected("suix_queryTransactionBlocks"));
        }
        Ok(page_of(&self.transactions, cursor.as_ref()))
    }

    async fn move_call(
        &self, signer: &str, call: &MoveCall, gas_budget: u64,
    ) -> Result<TransactionBytes> {
        if let Ok(mut calls) = self.move_calls.lock() {
            calls.push((signer.to_string(), call.clone()));
        }
        Ok(TransactionBytes {
            tx_bytes: format!("{}|{signer}|{gas_budget}", call.target()),
            gas: Vec::new(),
            input_objects: call.arguments.iter().map(CallArg::to_json).collect(),
        })
    }

    async fn execute_transaction_block(
        &self, tx_bytes: &str, signatures: &[String],
    ) -> Result<ExecutedTransaction> {
        if signatures.is_empty() {
            return Err(injected("sui_executeTransactionBlock"));
        }
        Ok(ExecutedTransaction {
            digest: format!("digest-of-{tx_bytes}"),
            effects: None,
        })
    }
}
