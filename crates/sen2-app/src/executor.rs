// Rust guideline compliant 2026-10-16

//! Paginated collection queries.

use crate::client::{ResourceClient, TransportError};
use crate::error::{AppError, Result};
use sen2_core::{InferenceRecord, QuerySpec};
use std::collections::HashSet;

/// What a query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Materialized records in backend order.
    Records(Vec<InferenceRecord>),
    /// Total number of matches reported by the backend.
    Count(u64),
}

impl QueryOutcome {
    /// Returns the records, or an empty list for a count.
    #[must_use]
    pub fn into_records(self) -> Vec<InferenceRecord> {
        match self {
            QueryOutcome::Records(records) => records,
            QueryOutcome::Count(_) => Vec::new(),
        }
    }
}

/// Runs a collection query.
///
/// # Arguments
///
/// * `client` - Remote resource client
/// * `resource` - Resource type, e.g. `inference`
/// * `query` - Filter, sort and pagination parameters
/// * `count_only` - Return the reported total after the first fetch
/// * `follow_pages` - Follow continuation links until exhausted
///
/// # Returns
///
/// The accumulated records, or the total count. Exactly one fetch is made
/// when `count_only` is set.
///
/// # Errors
///
/// Returns `AppError::Transport` if any fetch fails or a continuation link
/// points back to a page already fetched. A failure is never reported as an
/// empty result.
pub fn execute<C>(
    client: &C,
    resource: &str,
    query: &QuerySpec,
    count_only: bool,
    follow_pages: bool,
) -> Result<QueryOutcome>
where
    C: ResourceClient + ?Sized,
{
    tracing::debug!(resource, query = %query, count_only, follow_pages, "executing query");

    let first = client.fetch(resource, query).map_err(|e| fetch_failed(resource, e))?;

    if count_only {
        let count = match (first.total, &first.next) {
            (Some(total), _) => total,
            (None, None) => first.records.len() as u64,
            (None, Some(_)) => {
                return Err(fetch_failed(
                    resource,
                    TransportError::Document(
                        "backend reported no total count for a multi-page result".to_string(),
                    ),
                ))
            }
        };
        tracing::info!(resource, count, "counted matches");
        return Ok(QueryOutcome::Count(count));
    }

    let mut records = first.records;
    let mut next = if follow_pages { first.next } else { None };
    let mut visited = HashSet::new();

    while let Some(link) = next.take() {
        if !visited.insert(link.clone()) {
            return Err(fetch_failed(
                resource,
                TransportError::Document(format!("continuation link repeats: {}", link)),
            ));
        }
        let page = client.fetch_next(&link).map_err(|e| fetch_failed(resource, e))?;
        records.extend(page.records);
        next = page.next;
    }

    tracing::info!(resource, loaded = records.len(), pages = visited.len() + 1, "records loaded");
    Ok(QueryOutcome::Records(records))
}

fn fetch_failed(resource: &str, error: TransportError) -> AppError {
    tracing::error!(resource, error = %error, "could not fetch resources");
    AppError::Transport(error)
}
