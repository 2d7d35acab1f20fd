//! Node execution.
//!
//! `NodeRunner` is the host-side entry point:
//! 1. Looks up the node implementation by type name.
//! 2. Checks that every required credential is available.
//! 3. Executes the node once over the full input sequence.
//! 4. Wraps node failures as `EngineError::NodeFatal`; nothing is retried.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};
use uuid::Uuid;

use nodes::receiptli::{ReceiptliNode, NODE_NAME};
use nodes::{ExecutableNode, ExecuteFunctions, NodeOutput};

use crate::EngineError;

// ---------------------------------------------------------------------------
// Node registry
// ---------------------------------------------------------------------------

/// Maps `node_type` strings to shared `ExecutableNode` implementations.
pub type NodeRegistry = HashMap<String, Arc<dyn ExecutableNode>>;

/// Registry containing every built-in node.
pub fn default_registry() -> NodeRegistry {
    let mut registry: NodeRegistry = HashMap::new();
    registry.insert(NODE_NAME.to_owned(), Arc::new(ReceiptliNode::new()));
    registry
}

// ---------------------------------------------------------------------------
// Output of a completed execution
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ExecutionResult {
    pub execution_id: Uuid,
    pub node_type: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One sequence of items per output branch.
    pub output: NodeOutput,
}

// ---------------------------------------------------------------------------
// NodeRunner
// ---------------------------------------------------------------------------

/// Stateless dispatcher that runs a single node execution.
pub struct NodeRunner {
    registry: NodeRegistry,
}

impl NodeRunner {
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// Run `node_type` over the items supplied by `ctx`.
    ///
    /// # Errors
    /// Returns `EngineError` for unknown node types, missing required
    /// credentials, or any node failure.
    #[instrument(skip(self, ctx), fields(execution_id = tracing::field::Empty))]
    pub async fn run(
        &self,
        node_type: &str,
        ctx: &dyn ExecuteFunctions,
    ) -> Result<ExecutionResult, EngineError> {
        let execution_id = Uuid::new_v4();
        tracing::Span::current().record("execution_id", tracing::field::display(execution_id));

        let node = self
            .registry
            .get(node_type)
            .ok_or_else(|| EngineError::UnknownNode(node_type.to_owned()))?;

        for requirement in &node.description().credentials {
            if requirement.required && ctx.credentials(&requirement.name).is_err() {
                return Err(EngineError::MissingCredentials {
                    node: node_type.to_owned(),
                    credential: requirement.name.clone(),
                });
            }
        }

        let started_at = Utc::now();
        info!("executing node '{}' over {} items", node_type, ctx.input_data().len());

        let output = node.execute(ctx).await.map_err(|source| {
            error!("node '{}' failed: {}", node_type, source);
            EngineError::NodeFatal {
                node: node_type.to_owned(),
                source,
            }
        })?;

        let finished_at = Utc::now();
        info!(
            "node '{}' succeeded with {} items on the first branch",
            node_type,
            output.first().map_or(0, Vec::len)
        );

        Ok(ExecutionResult {
            execution_id,
            node_type: node_type.to_owned(),
            started_at,
            finished_at,
            output,
        })
    }
}

impl Default for NodeRunner {
    fn default() -> Self {
        Self::new(default_registry())
    }
}
