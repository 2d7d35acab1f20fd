//! `nodes` crate — the `ExecutableNode` trait, host contracts and built-in
//! node implementations.
//!
//! Every node must implement [`ExecutableNode`]. Hosts drive execution by
//! handing the node a [`ExecuteFunctions`] implementation that supplies the
//! input items, per-item parameters, credentials and binary buffers.

pub mod descriptor;
pub mod error;
pub mod mock;
pub mod params;
pub mod receiptli;
pub mod traits;

pub use descriptor::{CredentialDescriptor, NodeDescription, NodeProperty};
pub use error::NodeError;
pub use traits::{
    BinaryData, CredentialData, ExecutableNode, ExecuteFunctions, NodeExecutionData, NodeOutput,
};
