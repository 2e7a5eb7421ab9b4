// Rust guideline compliant 2026-10-16

//! JSON:API document encoding and decoding.

use crate::client::{Page, TransportError};
use sen2_core::{InferenceRecord, Status};
use serde_json::{json, Map, Value};

/// Media type for every request and response body.
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// To-one relationships flattened into `<name>_id` record fields.
const TO_ONE_RELATIONSHIPS: &[&str] = &["factbase", "knowledgebase"];

/// Decodes a collection document into a page.
///
/// # Errors
///
/// Returns `TransportError::Document` if `data` is not an array or a
/// resource object cannot be decoded.
pub fn page_from_document(document: &Value) -> Result<Page, TransportError> {
    let data = document
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| TransportError::Document("collection document has no data array".to_string()))?;

    let records = data
        .iter()
        .map(record_from_resource)
        .collect::<Result<Vec<_>, _>>()?;

    let total = document
        .get("meta")
        .and_then(|meta| meta.get("count"))
        .and_then(Value::as_u64);

    let next = document
        .get("links")
        .and_then(|links| links.get("next"))
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
        .map(str::to_string);

    Ok(Page {
        records,
        total,
        next,
    })
}

/// Decodes one resource object into a record.
///
/// Attributes become record fields; `factbase` and `knowledgebase`
/// relationships become `factbase_id` and `knowledgebase_id` unless the
/// attributes already carry them.
///
/// # Errors
///
/// Returns `TransportError::Document` if the id is missing or not numeric,
/// or the attributes do not fit the record.
pub fn record_from_resource(resource: &Value) -> Result<InferenceRecord, TransportError> {
    let id = resource_id(resource.get("id"))
        .ok_or_else(|| TransportError::Document(format!("resource without numeric id: {}", resource)))?;

    let mut fields = match resource.get("attributes") {
        Some(Value::Object(attributes)) => attributes.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            return Err(TransportError::Document(format!(
                "attributes of resource {} are not an object: {}",
                id, other
            )))
        }
    };
    fields.insert("id".to_string(), Value::from(id));

    for name in TO_ONE_RELATIONSHIPS {
        let key = format!("{}_id", name);
        if fields.get(&key).is_some_and(|value| !value.is_null()) {
            continue;
        }
        let related = resource
            .get("relationships")
            .and_then(|relationships| relationships.get(*name))
            .and_then(|relationship| relationship.get("data"))
            .and_then(|data| resource_id(data.get("id")));
        if let Some(related) = related {
            fields.insert(key, Value::from(related));
        }
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| TransportError::Document(format!("resource {}: {}", id, e)))
}

/// JSON:API ids are strings; some backends send numbers.
fn resource_id(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Reads the id of a freshly created resource.
///
/// # Errors
///
/// Returns `TransportError::Document` if the document carries no id.
pub fn created_id(document: &Value) -> Result<u64, TransportError> {
    resource_id(document.get("data").and_then(|data| data.get("id")))
        .ok_or_else(|| TransportError::Document("created resource has no id".to_string()))
}

/// Body of a status update.
#[must_use]
pub fn status_patch(resource: &str, id: u64, status: Status) -> Value {
    json!({
        "data": {
            "type": resource,
            "id": id.to_string(),
            "attributes": { "status": status.as_str() },
        }
    })
}

/// Extracts a readable message from a JSON:API error body.
#[must_use]
pub fn error_message(body: &str) -> String {
    let details: Vec<String> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|document| document.get("errors").and_then(Value::as_array).cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|error| {
            error
                .get("detail")
                .or_else(|| error.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect();

    if details.is_empty() {
        body.chars().take(200).collect()
    } else {
        details.join("; ")
    }
}
