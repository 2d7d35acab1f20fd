//! `ItemContext` — the engine's implementation of the node host helpers.
//!
//! One context is built per execution. It owns the input sequence and the
//! parameter values, and borrows the shared credential store.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::{Map, Value};

use nodes::{CredentialData, ExecuteFunctions, NodeError, NodeExecutionData};

use crate::models::CredentialStore;

pub struct ItemContext {
    items: Vec<NodeExecutionData>,
    parameters: Map<String, Value>,
    item_parameters: HashMap<usize, Map<String, Value>>,
    credentials: Arc<CredentialStore>,
}

impl ItemContext {
    pub fn new(items: Vec<NodeExecutionData>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            items,
            parameters: Map::new(),
            item_parameters: HashMap::new(),
            credentials,
        }
    }

    /// Parameter applied to every item unless overridden per item.
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Merge a JSON object of parameters applied to every item.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_item_parameter(
        mut self,
        item_index: usize,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.item_parameters
            .entry(item_index)
            .or_default()
            .insert(name.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ExecuteFunctions for ItemContext {
    fn input_data(&self) -> &[NodeExecutionData] {
        &self.items
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.item_parameters
            .get(&item_index)
            .and_then(|params| params.get(name))
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
        let item = self
            .items
            .get(item_index)
            .ok_or_else(|| NodeError::Host(format!("item index {item_index} out of range")))?;
        item.binary
            .get(property)
            .map(|b| b.data.clone())
            .ok_or_else(|| {
                NodeError::Host(format!(
                    "item {item_index} has no binary property '{property}'"
                ))
            })
    }
}
