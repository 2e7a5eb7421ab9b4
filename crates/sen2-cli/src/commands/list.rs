// Rust guideline compliant 2026-10-17

//! Implementation of the `sen2cli inference ls` command.
//!
//! Lists inferences matching the given filters, or only counts them.

use crate::commands::filters::{FilterArgs, QueryArgs};
use crate::OutputFormatter;
use anyhow::Result;
use sen2_app::{execute, AppError, QueryOutcome, ResourceClient, INFERENCE_RESOURCE};
use sen2_core::{FilterRequirement, DEFAULT_COLUMNS};

/// Options of `inference ls`.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Print the number of matches instead of the records
    #[arg(long = "count_only")]
    pub count_only: bool,

    /// Columns to show after the id
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

/// Lists or counts inferences.
///
/// # Arguments
///
/// * `client` - Backend session
/// * `args` - Filter, sort and paging options
/// * `formatter` - The output formatter to use
///
/// # Returns
///
/// The rendered listing or count.
///
/// # Errors
///
/// Returns an error if:
/// - A filter value is invalid
/// - The backend cannot be queried
pub fn execute_list<C>(client: &C, args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<String>
where
    C: ResourceClient + ?Sized,
{
    let query = args
        .query
        .compose(&args.filters, FilterRequirement::Optional)
        .map_err(AppError::from)?;

    let outcome = execute(
        client,
        INFERENCE_RESOURCE,
        &query,
        args.count_only,
        query.follows_continuations(),
    )?;

    let rendered = match outcome {
        QueryOutcome::Count(count) => formatter.format_count(count),
        QueryOutcome::Records(records) => {
            let columns: Vec<&str> = if args.columns.is_empty() {
                DEFAULT_COLUMNS.to_vec()
            } else {
                args.columns.iter().map(String::as_str).collect()
            };
            formatter.format_records(&records, &columns)
        }
    };
    Ok(rendered)
}
