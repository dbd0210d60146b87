//! Conversions between typed records and stored documents.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Document;

/// Serializes `value` into a document. Non-object values yield an empty document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Document::new()),
    }
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(document))
}
