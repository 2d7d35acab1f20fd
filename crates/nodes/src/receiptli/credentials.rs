use std::fmt;

use crate::traits::CredentialData;
use crate::NodeError;

/// Resolved `ReceiptliApi` credential.
///
/// Read once per execution and shared read-only across all items.
#[derive(Clone, PartialEq, Eq)]
pub struct ReceiptliCredentials {
    pub api_key: String,
    pub base_url: String,
}

impl ReceiptliCredentials {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build from the field map injected by the host.
    pub fn from_data(data: &CredentialData) -> Result<Self, NodeError> {
        let field = |name: &str| {
            data.get(name)
                .cloned()
                .ok_or_else(|| NodeError::Credentials(format!("missing field '{name}'")))
        };
        Ok(Self {
            api_key: field("apiKey")?,
            base_url: field("baseUrl")?,
        })
    }
}

impl fmt::Debug for ReceiptliCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptliCredentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
