//! Turning files on disk into input items.

use std::path::Path;

use anyhow::{Context, Result};
use nodes::{BinaryData, NodeExecutionData};
use serde_json::json;

/// MIME type for the document formats the extraction service accepts.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

/// Read `path` into an item carrying the file under `binary_property`.
///
/// The item's JSON records the source path so results can be traced back.
pub fn load_item(path: &Path, binary_property: &str) -> Result<NodeExecutionData> {
    let data = std::fs::read(path).with_context(|| format!("cannot read file {}", path.display()))?;

    let mut binary = BinaryData::new(data);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        binary = binary.with_file_name(name);
    }
    if let Some(mime) = mime_type_for(path) {
        binary = binary.with_mime_type(mime);
    }

    Ok(NodeExecutionData::from_json(json!({ "path": path.display().to_string() }))
        .with_binary(binary_property, binary))
}
