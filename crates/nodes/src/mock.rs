//! `MockHost` — a test double for `ExecuteFunctions`.
//!
//! Useful in unit and integration tests where a real host is either
//! unavailable or irrelevant.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use serde_json::Value;

use crate::traits::{CredentialData, ExecuteFunctions, NodeExecutionData};
use crate::NodeError;

/// An in-memory host that records every binary buffer request it receives.
pub struct MockHost {
    /// Input sequence handed to the node.
    pub items: Vec<NodeExecutionData>,
    /// Parameters applied to every item.
    pub parameters: HashMap<String, Value>,
    /// Per-item overrides, keyed by `(item_index, name)`.
    pub item_parameters: HashMap<(usize, String), Value>,
    /// Credentials keyed by credential type name.
    pub credentials: HashMap<String, CredentialData>,
    /// All `(item_index, property)` pairs requested through
    /// `binary_data_buffer` (in call order).
    pub buffer_requests: Arc<Mutex<Vec<(usize, String)>>>,
}

impl MockHost {
    pub fn new(items: Vec<NodeExecutionData>) -> Self {
        Self {
            items,
            parameters: HashMap::new(),
            item_parameters: HashMap::new(),
            credentials: HashMap::new(),
            buffer_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a parameter for every item.
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Set a parameter for a single item.
    pub fn with_item_parameter(
        mut self,
        item_index: usize,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.item_parameters.insert((item_index, name.into()), value);
        self
    }

    pub fn with_credentials<K, V>(
        mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.credentials.insert(name.into(), fields);
        self
    }

    /// Number of times a binary buffer was fetched.
    pub fn buffer_request_count(&self) -> usize {
        self.buffer_requests.lock().unwrap().len()
    }
}

impl ExecuteFunctions for MockHost {
    fn input_data(&self) -> &[NodeExecutionData] {
        &self.items
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.item_parameters
            .get(&(item_index, name.to_owned()))
            .or_else(|| self.parameters.get(name))
            .cloned()
    }

    fn credentials(&self, name: &str) -> Result<CredentialData, NodeError> {
        self.credentials
            .get(name)
            .cloned()
            .ok_or_else(|| NodeError::Credentials(format!("no credentials of type '{name}'")))
    }

    fn binary_data_buffer(&self, item_index: usize, property: &str) -> Result<Bytes, NodeError> {
        self.buffer_requests
            .lock()
            .unwrap()
            .push((item_index, property.to_owned()));

        self.items
            .get(item_index)
            .and_then(|item| item.binary.get(property))
            .map(|b| b.data.clone())
            .ok_or_else(|| {
                NodeError::Host(format!(
                    "item {item_index} has no binary property '{property}'"
                ))
            })
    }
}
