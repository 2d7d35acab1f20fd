//! Declarative node and credential descriptors.
//!
//! These types describe what a node needs from its host: the credential
//! fields to collect and the per-item parameters to render in the editor.
//! They carry no behaviour beyond lookups and are serialised to camelCase
//! JSON so a host UI can consume them verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Editor widget type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    /// Free-form text.
    String,
    /// Closed set of choices, see [`NodeProperty::options`].
    Options,
}

/// One entry of an `Options` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    /// Label shown to the workflow author.
    pub name: String,
    /// Value handed to the node.
    pub value: String,
}

impl PropertyOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Rendering hints for a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    /// Mask the value in the UI.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub password: bool,
    /// Number of rows for a multi-line text box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// A single configurable field of a node or credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default: Value,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(default, skip_serializing_if = "is_default_type_options")]
    pub type_options: TypeOptions,
}

fn is_default_type_options(opts: &TypeOptions) -> bool {
    *opts == TypeOptions::default()
}

impl NodeProperty {
    /// A plain string property.
    pub fn string(
        display_name: impl Into<String>,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            name: name.into(),
            property_type: PropertyType::String,
            default: Value::String(default.into()),
            required: false,
            description: None,
            options: Vec::new(),
            type_options: TypeOptions::default(),
        }
    }

    /// An options property; `default` should be one of the option values.
    pub fn options(
        display_name: impl Into<String>,
        name: impl Into<String>,
        options: Vec<PropertyOption>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            property_type: PropertyType::Options,
            options,
            ..Self::string(display_name, name, default)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn password(mut self) -> Self {
        self.type_options.password = true;
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.type_options.rows = Some(rows);
        self
    }

    /// Whether `value` is acceptable for this property.
    ///
    /// `Options` properties accept only their declared values; string
    /// properties accept any string.
    pub fn accepts(&self, value: &str) -> bool {
        match self.property_type {
            PropertyType::String => true,
            PropertyType::Options => self.options.iter().any(|o| o.value == value),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Fields a host must collect and inject for a named credential type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescriptor {
    pub name: String,
    pub display_name: String,
    pub properties: Vec<NodeProperty>,
}

impl CredentialDescriptor {
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A credential type a node depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Node description
// ---------------------------------------------------------------------------

/// Default values applied when the node is dropped onto a canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefaults {
    pub name: String,
}

/// Everything a host needs to know to render and wire a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub credentials: Vec<CredentialRequirement>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    /// Look up a declared property by name.
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}
