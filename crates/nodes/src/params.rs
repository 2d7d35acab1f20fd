//! Parameter resolution against a node's declared properties.

use serde_json::Value;

use crate::descriptor::NodeDescription;
use crate::traits::ExecuteFunctions;
use crate::NodeError;

/// Resolve a string parameter for one item.
///
/// Unset parameters fall back to the declared default. The resolved value
/// must be a string, must be non-empty when the property is required, and
/// must be one of the declared values for `Options` properties.
pub fn get_node_parameter(
    ctx: &dyn ExecuteFunctions,
    description: &NodeDescription,
    name: &str,
    item_index: usize,
) -> Result<String, NodeError> {
    let property = description
        .property(name)
        .ok_or_else(|| invalid(name, "parameter is not declared by this node"))?;

    let raw = match ctx.node_parameter(name, item_index) {
        Some(Value::Null) | None => property.default.clone(),
        Some(v) => v,
    };

    let value = match raw {
        Value::String(s) => s,
        other => return Err(invalid(name, format!("expected a string, got {other}"))),
    };

    if property.required && value.is_empty() {
        return Err(invalid(name, "a value is required"));
    }

    if !property.accepts(&value) {
        let allowed: Vec<&str> = property.options.iter().map(|o| o.value.as_str()).collect();
        return Err(invalid(name, format!("'{value}' is not one of {allowed:?}")));
    }

    Ok(value)
}

fn invalid(name: &str, message: impl Into<String>) -> NodeError {
    NodeError::InvalidParameter {
        name: name.to_owned(),
        message: message.into(),
    }
}
