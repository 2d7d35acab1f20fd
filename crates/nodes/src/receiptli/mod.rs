//! Receiptli document extraction: credential type, node and HTTP client.

pub mod client;
pub mod credentials;
pub mod description;
pub mod node;

pub use client::{ExtractionClient, ExtractionRequest, EXTRACTION_TIMEOUT};
pub use credentials::ReceiptliCredentials;
pub use description::{receiptli_credentials, receiptli_description, CREDENTIAL_NAME, NODE_NAME};
pub use node::ReceiptliNode;
