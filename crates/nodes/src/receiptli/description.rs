//! Host-facing declarations for the Receiptli node and its credential type.

use crate::descriptor::{
    CredentialDescriptor, CredentialRequirement, NodeDefaults, NodeDescription, NodeProperty,
    PropertyOption,
};

/// Credential type name the node asks the host for.
pub const CREDENTIAL_NAME: &str = "ReceiptliApi";

/// Node type name under which the host registers the node.
pub const NODE_NAME: &str = "receiptli";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_BINARY_PROPERTY: &str = "data";

// Parameter names.
pub const BINARY_PROPERTY_NAME: &str = "binaryPropertyName";
pub const SCHEMA: &str = "schema";
pub const LANGUAGE: &str = "language";

/// The `ReceiptliApi` credential: an API key and the service base URL.
pub fn receiptli_credentials() -> CredentialDescriptor {
    CredentialDescriptor {
        name: CREDENTIAL_NAME.into(),
        display_name: "Text Extractor API".into(),
        properties: vec![
            NodeProperty::string("API Key", "apiKey", "")
                .required()
                .password(),
            NodeProperty::string("Base URL", "baseUrl", DEFAULT_BASE_URL).required(),
        ],
    }
}

pub fn receiptli_description() -> NodeDescription {
    NodeDescription {
        display_name: "Receiptli".into(),
        name: NODE_NAME.into(),
        icon: "file:receiptli.svg".into(),
        group: vec!["transform".into()],
        version: 1,
        description: "Automatically parse forms, resumes, and invoices using AI. \
                      Turn unstructured documents into structured insights — \
                      no templates required."
            .into(),
        defaults: NodeDefaults {
            name: "Receiptli".into(),
        },
        inputs: vec!["main".into()],
        outputs: vec!["main".into()],
        credentials: vec![CredentialRequirement {
            name: CREDENTIAL_NAME.into(),
            required: true,
        }],
        properties: vec![
            NodeProperty::string(
                "Binary Property Name",
                BINARY_PROPERTY_NAME,
                DEFAULT_BINARY_PROPERTY,
            )
            .required()
            .with_description("Name of the binary property containing the uploaded file"),
            NodeProperty::string("Schema (JSON)", SCHEMA, "")
                .required()
                .rows(6),
            NodeProperty::options(
                "Language",
                LANGUAGE,
                vec![
                    PropertyOption::new("English", "eng"),
                    PropertyOption::new("Arabic", "ar"),
                ],
                "eng",
            ),
        ],
    }
}
