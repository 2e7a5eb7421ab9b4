// Rust guideline compliant 2026-10-17

//! Implementation of the `sen2cli inference create` command.

use crate::OutputFormatter;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sen2_app::{create_inference, AppError, ResourceClient, INFERENCE_RESOURCE};
use sen2_core::InferenceDraft;
use std::path::PathBuf;

/// Options of `inference create`.
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Model (knowledgebase) to run
    pub knowledgebase_id: u64,

    /// Factbase (input data) to run on
    pub factbase_id: u64,

    /// First day of the temporal subset (YYYY-MM-DD)
    pub temporal_subset_start: NaiveDate,

    /// Last day of the temporal subset (YYYY-MM-DD)
    pub temporal_subset_end: NaiveDate,

    /// GeoJSON file with the spatial subset
    pub spatial_subset: PathBuf,

    /// Description of the inference
    #[arg(long)]
    pub description: Option<String>,

    /// Owner recorded on the inference; defaults to the configured owner
    #[arg(long)]
    pub owner: Option<String>,
}

/// Creates an inference.
///
/// # Arguments
///
/// * `client` - Backend session
/// * `args` - Inference parameters
/// * `default_owner` - Owner from the configuration
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The spatial subset file cannot be read or is not JSON
/// - The temporal subset is empty
/// - The backend rejects the inference
pub fn execute_create<C>(
    client: &C,
    args: &CreateArgs,
    default_owner: Option<&str>,
    formatter: &dyn OutputFormatter,
) -> Result<String>
where
    C: ResourceClient + ?Sized,
{
    let geojson = std::fs::read_to_string(&args.spatial_subset)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to read spatial subset {}", args.spatial_subset.display()))?;

    let owner = args
        .owner
        .clone()
        .or_else(|| default_owner.map(str::to_string));
    let draft = InferenceDraft::new(
        args.knowledgebase_id,
        args.factbase_id,
        args.temporal_subset_start,
        args.temporal_subset_end,
        &geojson,
        args.description.clone(),
        owner,
    )
    .map_err(AppError::from)?;

    let id = create_inference(client, INFERENCE_RESOURCE, &draft)?;
    Ok(formatter.format_ids("create", &[id], false))
}
