//! Shapes of the Sui JSON-RPC responses this crate reads.
//!
//! Only the members we consume are modelled; everything else is ignored by serde.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `sui_getObject` / one entry of `sui_multiGetObjects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectResponse {
    /// Object data, absent when the object does not exist or was deleted.
    #[serde(default)]
    pub data: Option<ObjectData>,
    /// Why `data` is absent.
    #[serde(default)]
    pub error: Option<Value>,
}

impl ObjectResponse {
    /// Unwrap into the data, `None` for a missing or deleted object.
    #[must_use]
    pub fn into_data(self) -> Option<ObjectData> {
        self.data
    }
}

/// A single on-chain object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    /// Object id.
    pub object_id: String,
    /// Move type of the object, when requested with `showType`.
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    /// Owner description, when requested with `showOwner`.
    #[serde(default)]
    pub owner: Option<Value>,
    /// Parsed Move content, when requested with `showContent`.
    #[serde(default)]
    pub content: Option<MoveContent>,
}

impl ObjectData {
    /// Move type of the object, from the object or from its content.
    #[must_use]
    pub fn move_type(&self) -> Option<&str> {
        self.object_type
            .as_deref()
            .or_else(|| self.content.as_ref().and_then(|c| c.object_type.as_deref()))
    }

    /// Move struct fields, `Null` when the content was not requested or is a package.
    #[must_use]
    pub fn fields(&self) -> &Value {
        self.content.as_ref().map_or(&Value::Null, |c| &c.fields)
    }

    /// Address owning the object, if it is address owned.
    #[must_use]
    pub fn owner_address(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .and_then(|o| o.get("AddressOwner"))
            .and_then(Value::as_str)
    }
}

/// `content` member of an object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveContent {
    /// `moveObject` or `package`.
    #[serde(default)]
    pub data_type: String,
    /// Move struct type.
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    /// Struct fields as the node renders them.
    #[serde(default)]
    pub fields: Value,
}

/// Paginated RPC result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Cursor of the next page.
    #[serde(default)]
    pub next_cursor: Option<Value>,
    /// Whether another page exists.
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next_cursor: None,
            has_next_page: false,
        }
    }
}

/// One transaction block of `suix_queryTransactionBlocks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlock {
    /// Transaction digest.
    pub digest: String,
    /// Object changes, when requested with `showObjectChanges`.
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
}

/// Object change caused by a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    /// A new object.
    #[serde(rename_all = "camelCase")]
    Created {
        /// Id of the created object.
        object_id: String,
        /// Its Move type.
        object_type: String,
        /// Transaction sender.
        #[serde(default)]
        sender: Option<String>,
    },
    /// An existing object changed.
    #[serde(rename_all = "camelCase")]
    Mutated {
        /// Id of the mutated object.
        object_id: String,
        /// Its Move type.
        object_type: String,
    },
    /// Anything else (deleted, wrapped, published, transferred).
    #[serde(other)]
    Other,
}

/// Which transactions `suix_queryTransactionBlocks` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionFilter {
    /// Calls of one Move function.
    MoveFunction {
        /// Package id.
        package: String,
        /// Module name.
        module: String,
        /// Function name.
        function: String,
    },
    /// Transactions sent by an address.
    FromAddress(String),
}

/// Unsigned transaction produced by `unsafe_moveCall`, ready for a wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    /// BCS bytes of the transaction data, base64.
    pub tx_bytes: String,
    /// Gas objects picked by the node.
    #[serde(default)]
    pub gas: Vec<Value>,
    /// Objects the transaction reads.
    #[serde(default)]
    pub input_objects: Vec<Value>,
}

/// Outcome of `sui_executeTransactionBlock`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedTransaction {
    /// Transaction digest.
    pub digest: String,
    /// Effects as returned by the node.
    #[serde(default)]
    pub effects: Option<Value>,
}
