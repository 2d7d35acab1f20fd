//! The `ExecutableNode` trait and the host helpers it is executed against.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::NodeDescription;
use crate::NodeError;

// ---------------------------------------------------------------------------
// Item data
// ---------------------------------------------------------------------------

/// A file attached to an item under a named binary property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryData {
    pub data: Bytes,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl BinaryData {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            mime_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// One item flowing between nodes.
///
/// Only `json` is serialised; binary attachments stay in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeExecutionData {
    pub json: Value,
    #[serde(skip)]
    pub binary: BTreeMap<String, BinaryData>,
}

impl NodeExecutionData {
    pub fn from_json(json: Value) -> Self {
        Self {
            json,
            binary: BTreeMap::new(),
        }
    }

    pub fn with_binary(mut self, property: impl Into<String>, data: BinaryData) -> Self {
        self.binary.insert(property.into(), data);
        self
    }
}

/// Output of a node: one sequence of items per output branch.
pub type NodeOutput = Vec<Vec<NodeExecutionData>>;

/// Decrypted credential fields keyed by field name.
pub type CredentialData = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Host helpers
// ---------------------------------------------------------------------------

/// Capabilities the host injects into a node execution.
///
/// Kept object safe so the engine and test doubles can both hand a
/// `&dyn ExecuteFunctions` to any node.
pub trait ExecuteFunctions: Send + Sync {
    /// The full input sequence, in order.
    fn input_data(&self) -> &[NodeExecutionData];

    /// Raw parameter value for the item at `item_index`, or `None` when the
    /// workflow author left it unset.
    fn node_parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    /// Credential fields for the named credential type.
    fn credentials(&self, name: &str) -> Result<CredentialData, NodeError>;

    /// Raw bytes of a binary attachment.
    fn binary_data_buffer(&self, item_index: usize, property: &str) -> Result<Bytes, NodeError>;
}

// ---------------------------------------------------------------------------
// ExecutableNode
// ---------------------------------------------------------------------------

/// The core node trait.
///
/// All built-in nodes must implement this.
#[async_trait]
pub trait ExecutableNode: Send + Sync {
    /// Static description consumed by the host.
    fn description(&self) -> &NodeDescription;

    /// Process the host's input sequence and return the output branches.
    async fn execute(&self, ctx: &dyn ExecuteFunctions) -> Result<NodeOutput, NodeError>;
}
