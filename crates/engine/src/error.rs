//! Engine-level error types.

use thiserror::Error;

/// Errors produced while running a node on behalf of a workflow.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No implementation is registered under the requested node type.
    #[error("no implementation registered for node_type '{0}'")]
    UnknownNode(String),

    /// A credential the node declares as required was not supplied.
    #[error("node '{node}' requires credentials of type '{credential}'")]
    MissingCredentials { node: String, credential: String },

    /// The node failed; the whole execution is aborted.
    #[error("node '{node}' failed fatally: {source}")]
    NodeFatal {
        node: String,
        #[source]
        source: nodes::NodeError,
    },
}
