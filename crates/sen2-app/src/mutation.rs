// Rust guideline compliant 2026-10-16

//! Guarded batch mutations of inference records.

use crate::client::ResourceClient;
use crate::error::{AppError, Result};
use crate::executor::execute;
use sen2_core::{allow_list, Error as CoreError, InferenceRecord, QuerySpec, TransitionTarget};

/// Applies `target` to every record whose current status allows it.
///
/// Records in a forbidden status are logged and left out of the result.
/// With `dry_run` nothing is written; the result lists the records that
/// would have been changed.
///
/// # Arguments
///
/// * `client` - Remote resource client
/// * `resource` - Resource type, e.g. `inference`
/// * `records` - Candidate records, typically a query result
/// * `target` - New status, or deletion
/// * `dry_run` - Stage only, never write
///
/// # Returns
///
/// The records that were (or would have been) changed, in input order.
/// Status updates are reflected in the returned records.
///
/// # Errors
///
/// Returns `AppError::UnsupportedTransition` if `target` has no allow-list,
/// before any record is inspected. Returns `AppError::Transport` if a write
/// fails; writes already made are not rolled back.
pub fn apply<C>(
    client: &C,
    resource: &str,
    records: Vec<InferenceRecord>,
    target: TransitionTarget,
    dry_run: bool,
) -> Result<Vec<InferenceRecord>>
where
    C: ResourceClient + ?Sized,
{
    let allowed = allow_list(target).ok_or_else(|| AppError::UnsupportedTransition(target.to_string()))?;

    let mut changed = Vec::new();
    for mut record in records {
        let current = record.status;
        if !current.is_some_and(|status| allowed.contains(&status)) {
            tracing::warn!(
                id = record.id,
                status = %current.map_or("NONE", |status| status.as_str()),
                target = %target,
                "transition not allowed, skipping"
            );
            continue;
        }

        if dry_run {
            tracing::info!(id = record.id, target = %target, "dry run, not committing");
            changed.push(record);
            continue;
        }

        match target {
            TransitionTarget::Status(status) => {
                client.update_status(resource, record.id, status).map_err(|e| {
                    tracing::error!(id = record.id, error = %e, "could not update status");
                    AppError::Transport(e)
                })?;
                record.status = Some(status);
            }
            TransitionTarget::Delete => {
                client.delete(resource, record.id).map_err(|e| {
                    tracing::error!(id = record.id, error = %e, "could not delete");
                    AppError::Transport(e)
                })?;
            }
        }
        tracing::info!(id = record.id, target = %target, "committed");
        changed.push(record);
    }

    Ok(changed)
}

/// Fetches the records matching `query` and applies `target` to them.
///
/// All pages are fetched unless the query names a single page.
///
/// # Errors
///
/// Returns `AppError::Core(Validation)` if the query has no filter, so that a
/// mutation can never address the whole collection. Otherwise the errors of
/// [`execute`] and [`apply`].
pub fn update_records<C>(
    client: &C,
    resource: &str,
    query: &QuerySpec,
    target: TransitionTarget,
    dry_run: bool,
) -> Result<Vec<InferenceRecord>>
where
    C: ResourceClient + ?Sized,
{
    if query.filter().is_empty() {
        return Err(CoreError::Validation(
            "At least one filter argument needs to be given.".to_string(),
        )
        .into());
    }

    let records = execute(client, resource, query, false, query.follows_continuations())?
        .into_records();
    tracing::debug!(candidates = records.len(), target = %target, "applying transition");

    apply(client, resource, records, target, dry_run)
}
