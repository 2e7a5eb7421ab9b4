// Rust guideline compliant 2026-10-16

//! Creation of new inferences.

use crate::client::ResourceClient;
use crate::error::{AppError, Result};
use sen2_core::InferenceDraft;
use serde_json::{json, Value};

/// Builds the JSON:API document that creates `draft`.
#[must_use]
pub fn create_document(resource: &str, draft: &InferenceDraft) -> Value {
    json!({
        "data": {
            "type": resource,
            "attributes": draft.attributes(),
            "relationships": {
                "factbase": {
                    "data": { "type": "factbase", "id": draft.factbase_id.to_string() }
                },
                "knowledgebase": {
                    "data": { "type": "knowledgebase", "id": draft.knowledgebase_id.to_string() }
                }
            }
        }
    })
}

/// Creates an inference and returns the id the backend assigned.
///
/// # Errors
///
/// Returns `AppError::Transport` if the backend rejects the document or its
/// answer carries no id.
pub fn create_inference<C>(client: &C, resource: &str, draft: &InferenceDraft) -> Result<u64>
where
    C: ResourceClient + ?Sized,
{
    tracing::info!(
        knowledgebase = draft.knowledgebase_id,
        factbase = draft.factbase_id,
        start = %draft.temp_range_start,
        end = %draft.temp_range_end,
        "creating inference"
    );

    let id = client
        .create(resource, &create_document(resource, draft))
        .map_err(|e| {
            tracing::error!(error = %e, "could not create inference");
            AppError::Transport(e)
        })?;

    tracing::info!(id, "inference created");
    Ok(id)
}
