// Rust guideline compliant 2026-10-17

//! Implementation of the `rerun`, `abort` and `delete` inference commands.

use crate::commands::filters::{FilterArgs, QueryArgs};
use crate::OutputFormatter;
use anyhow::Result;
use sen2_app::{update_records, AppError, ResourceClient, INFERENCE_RESOURCE};
use sen2_core::{FilterRequirement, Status, TransitionTarget};

/// Options of the mutating inference commands.
#[derive(Debug, Clone, clap::Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// A mutating inference command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Rerun,
    Abort,
    Delete,
}

impl UpdateAction {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            UpdateAction::Rerun => "rerun",
            UpdateAction::Abort => "abort",
            UpdateAction::Delete => "delete",
        }
    }

    #[must_use]
    pub fn target(self) -> TransitionTarget {
        match self {
            UpdateAction::Rerun => TransitionTarget::Status(Status::Created),
            UpdateAction::Abort => TransitionTarget::Status(Status::Aborted),
            UpdateAction::Delete => TransitionTarget::Delete,
        }
    }
}

/// Applies `action` to every inference matching the filters.
///
/// Inferences whose status does not allow the action are skipped with a
/// warning. With `--page_number` only that page is considered.
///
/// # Errors
///
/// Returns an error if:
/// - No filter option was given
/// - The backend cannot be queried or rejects a change
pub fn execute_update<C>(
    client: &C,
    action: UpdateAction,
    args: &UpdateArgs,
    formatter: &dyn OutputFormatter,
) -> Result<String>
where
    C: ResourceClient + ?Sized,
{
    let query = args
        .query
        .compose(&args.filters, FilterRequirement::Required)
        .map_err(AppError::from)?;

    let changed = update_records(client, INFERENCE_RESOURCE, &query, action.target(), args.dry_run)?;
    let ids: Vec<u64> = changed.iter().map(|record| record.id).collect();

    Ok(formatter.format_ids(action.name(), &ids, args.dry_run))
}
