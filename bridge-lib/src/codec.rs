//! Structured document marshaling
//!
//! Every parameter payload crosses the boundary as a JSON string. An empty or
//! missing string means "no value" and is kept apart from an empty document.

use crate::error::{BridgeError, Result};

/// Tree of maps, sequences and scalars used for every structured payload.
pub type Document = serde_json::Value;

/// Parses a managed string. `None` and `""` both decode to an absent document.
pub fn decode(text: Option<&str>) -> Result<Option<Document>> {
    match text {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(BridgeError::malformed),
    }
}

/// Parses a parameter that has no default.
pub fn decode_required(name: &'static str, text: Option<&str>) -> Result<Document> {
    let text = text.ok_or(BridgeError::NullArgument(name))?;
    decode(Some(text))?.ok_or_else(|| BridgeError::malformed(format!("{} is empty", name)))
}

/// Absent parameters default to `{}`.
pub fn decode_or_object(text: Option<&str>) -> Result<Document> {
    Ok(decode(text)?.unwrap_or_else(|| Document::Object(Default::default())))
}

/// Absent parameters default to `[]`.
pub fn decode_or_array(text: Option<&str>) -> Result<Document> {
    Ok(decode(text)?.unwrap_or_else(|| Document::Array(Vec::new())))
}

/// Absent parameters default to `null`.
pub fn decode_or_null(text: Option<&str>) -> Result<Document> {
    Ok(decode(text)?.unwrap_or(Document::Null))
}

pub fn encode(document: &Document) -> String {
    document.to_string()
}
