//! Node-level error type.

use thiserror::Error;

/// Errors returned by a node's `execute` method.
///
/// Every variant is fatal: the engine aborts the whole execution and no
/// partial output is produced for the remaining items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The configured binary property is absent on the current input item.
    #[error(
        "No binary data found on property \"{property}\". Ensure previous node provides a file."
    )]
    MissingBinaryData { property: String },

    /// The remote call failed: transport error, timeout, non-success status
    /// or a response body that is not JSON.
    #[error("request for item {item_index} failed: {message}")]
    RequestFailure { item_index: usize, message: String },

    /// A node parameter resolved to a value the node cannot use.
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Credentials were not supplied or are incomplete.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// A host helper failed.
    #[error("host error: {0}")]
    Host(String),
}
