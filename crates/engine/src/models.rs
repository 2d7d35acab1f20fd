//! Host-side data the engine owns across executions.

use std::collections::HashMap;

use nodes::CredentialData;

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Credential values keyed by credential type name.
///
/// Populated once per host configuration and shared read-only by every
/// execution.
#[derive(Clone, Default)]
pub struct CredentialStore {
    entries: HashMap<String, CredentialData>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the fields of one credential type.
    pub fn insert<K, V>(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.entries.insert(name.into(), fields);
    }

    pub fn get(&self, name: &str) -> Option<&CredentialData> {
        self.entries.get(name)
    }
}

// Field values are secrets; only the type names are printed.
impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
