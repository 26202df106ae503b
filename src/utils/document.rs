// Conversões entre o corpo JSON das requisições e documentos BSON

use chrono::{SecondsFormat, TimeZone, Utc};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;

use crate::utils::error::AppError;

/// Parses a request body into a document. An empty body is an empty document.
pub fn parse_body(body: &[u8]) -> Result<Document, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidBody(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(map) => mongodb::bson::to_document(&map)
            .map_err(|e| AppError::InvalidBody(format!("Invalid JSON body: {}", e))),
        _ => Err(AppError::InvalidBody("Request body must be a JSON object".into())),
    }
}

/// Returns the field when it is a non-empty string.
pub fn non_empty_str<'a>(doc: &'a Document, key: &str) -> Option<&'a str> {
    doc.get_str(key).ok().filter(|s| !s.is_empty())
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    Ok(ObjectId::parse_str(id)?)
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

/// Renders BSON the way a JSON client expects it: ids as hex strings and
/// dates as ISO-8601 UTC with milliseconds.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => {
            let millis = dt.timestamp_millis();
            match Utc.timestamp_millis_opt(millis).single() {
                Some(ts) => Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
                None => Value::from(millis),
            }
        }
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
