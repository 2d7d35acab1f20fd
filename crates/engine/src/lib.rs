//! `engine` crate — the host side of node execution: credential storage,
//! the per-execution item context, and the node runner.

pub mod context;
pub mod error;
pub mod executor;
pub mod models;

pub use context::ItemContext;
pub use error::EngineError;
pub use executor::{default_registry, ExecutionResult, NodeRegistry, NodeRunner};
pub use models::CredentialStore;
