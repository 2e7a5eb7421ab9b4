// Rust guideline compliant 2026-10-14

//! Core data models for sen2cli.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns rendered for an inference when the caller does not choose any.
///
/// `id` is not listed; renderers always put it first.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "factbase_id",
    "favourite",
    "knowledgebase_id",
    "owner",
    "qgis_project_location",
    "output",
    "status",
    "status_message",
    "status_progress",
    "status_timestamp",
    "temp_range_end",
    "temp_range_start",
    "timestamp_created",
    "timestamp_finished",
    "timestamp_started",
];

/// Lifecycle status of an inference as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Queued for scheduling; also the target of a rerun.
    Created,
    /// Picked up by the scheduler.
    Scheduled,
    /// Running.
    Started,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Stopped on request.
    Aborted,
    /// Backing data is offline.
    Offline,
    /// Any status string this client does not know.
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Every status a caller may name on the command line.
    pub const KNOWN: [Status; 7] = [
        Status::Aborted,
        Status::Created,
        Status::Failed,
        Status::Offline,
        Status::Scheduled,
        Status::Started,
        Status::Succeeded,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "CREATED",
            Status::Scheduled => "SCHEDULED",
            Status::Started => "STARTED",
            Status::Succeeded => "SUCCEEDED",
            Status::Failed => "FAILED",
            Status::Aborted => "ABORTED",
            Status::Offline => "OFFLINE",
            Status::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Parses a status case-insensitively. `UNKNOWN` is not accepted.
    fn from_str(value: &str) -> Result<Self> {
        let upper = value.trim().to_ascii_uppercase();
        Status::KNOWN
            .iter()
            .copied()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| Error::InvalidStatus(value.to_string()))
    }
}

/// Client-side projection of a remote `inference` resource.
///
/// Attributes the client has no typed field for are kept in `extra`
/// so that any requested column can still be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRecord {
    /// Server-assigned identifier.
    pub id: u64,
    /// Owning user.
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    /// Current status; `None` when the backend reports null.
    #[serde(default)]
    pub status: Option<Status>,
    /// Free-form status detail.
    #[serde(default)]
    pub status_message: Option<String>,
    /// Factbase (input data) the inference runs on.
    #[serde(default)]
    pub factbase_id: Option<u64>,
    /// Knowledgebase (model) the inference runs.
    #[serde(default)]
    pub knowledgebase_id: Option<u64>,
    #[serde(default)]
    pub timestamp_created: Option<String>,
    #[serde(default)]
    pub timestamp_started: Option<String>,
    #[serde(default)]
    pub timestamp_finished: Option<String>,
    /// Start of the temporal subset (ISO-8601, start of day).
    #[serde(default)]
    pub temp_range_start: Option<String>,
    /// End of the temporal subset (ISO-8601, end of day).
    #[serde(default)]
    pub temp_range_end: Option<String>,
    /// Spatial subset as GeoJSON text.
    #[serde(default)]
    pub area_of_interest: Option<String>,
    #[serde(default)]
    pub qgis_project_location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: Vec<String>,
    #[serde(default)]
    pub output_scale_factor: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favourite: bool,
    /// Description supplied on creation.
    #[serde(default)]
    pub comment: Option<String>,
    /// Remaining attributes, keyed by their wire name.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl InferenceRecord {
    /// Creates a record with the given id and status and every other field empty.
    #[must_use]
    pub fn new(id: u64, status: Status) -> Self {
        Self {
            id,
            owner: String::new(),
            status: Some(status),
            status_message: None,
            factbase_id: None,
            knowledgebase_id: None,
            timestamp_created: None,
            timestamp_started: None,
            timestamp_finished: None,
            temp_range_start: None,
            temp_range_end: None,
            area_of_interest: None,
            qgis_project_location: None,
            output: Vec::new(),
            output_scale_factor: None,
            favourite: false,
            comment: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Projects the record onto `id` followed by `columns`.
    ///
    /// Columns the record does not carry are returned as `null`.
    #[must_use]
    pub fn to_row(&self, columns: &[&str]) -> Vec<(String, serde_json::Value)> {
        let fields = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };

        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(("id".to_string(), serde_json::Value::from(self.id)));
        for column in columns {
            let value = match fields.get(*column) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!(
                        inference = self.id,
                        column = *column,
                        "column not present in resource, rendering null"
                    );
                    serde_json::Value::Null
                }
            };
            row.push(((*column).to_string(), value));
        }
        row
    }
}

/// Input for creating a new inference.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceDraft {
    pub knowledgebase_id: u64,
    pub factbase_id: u64,
    pub temp_range_start: NaiveDate,
    pub temp_range_end: NaiveDate,
    /// GeoJSON with line breaks flattened to spaces.
    pub area_of_interest: String,
    pub comment: Option<String>,
    pub owner: Option<String>,
}

impl InferenceDraft {
    /// Builds a validated draft.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `temp_range_start` is after `temp_range_end`
    /// - `geojson` is not valid JSON
    pub fn new(
        knowledgebase_id: u64,
        factbase_id: u64,
        temp_range_start: NaiveDate,
        temp_range_end: NaiveDate,
        geojson: &str,
        comment: Option<String>,
        owner: Option<String>,
    ) -> Result<Self> {
        if temp_range_start > temp_range_end {
            return Err(Error::Validation(format!(
                "Temporal subset start {} is after end {}",
                temp_range_start, temp_range_end
            )));
        }

        let area_of_interest = geojson.replace("\r\n", " ").replace('\n', " ");
        serde_json::from_str::<serde_json::Value>(&area_of_interest).map_err(|e| {
            Error::Validation(format!("Spatial subset is not valid GeoJSON: {}", e))
        })?;

        Ok(Self {
            knowledgebase_id,
            factbase_id,
            temp_range_start,
            temp_range_end,
            area_of_interest,
            comment,
            owner,
        })
    }

    /// Start of the temporal subset, pinned to the start of the day.
    #[must_use]
    pub fn temp_range_start_iso(&self) -> String {
        self.temp_range_start
            .format("%Y-%m-%dT00:00:00.000Z")
            .to_string()
    }

    /// End of the temporal subset, pinned to the last millisecond of the day.
    #[must_use]
    pub fn temp_range_end_iso(&self) -> String {
        self.temp_range_end
            .format("%Y-%m-%dT23:59:59.999Z")
            .to_string()
    }

    /// Attribute object sent when creating the inference.
    #[must_use]
    pub fn attributes(&self) -> serde_json::Value {
        serde_json::json!({
            "owner": self.owner,
            "timestamp_created": null,
            "timestamp_started": null,
            "timestamp_finished": null,
            "status": null,
            "status_message": null,
            "output": [],
            "favourite": false,
            "comment": self.comment,
            "temp_range_start": self.temp_range_start_iso(),
            "temp_range_end": self.temp_range_end_iso(),
            "area_of_interest": self.area_of_interest,
            "output_scale_factor": 1,
        })
    }
}
