// Rust guideline compliant 2026-10-17

//! Output formatting module for the sen2cli CLI.
//!
//! This module renders inference listings, counts, mutation results and
//! errors as CSV, JSON or human-readable tables.

use chrono::{DateTime, Utc};
use sen2_app::{ErrorEnvelope, SessionInfo, SuccessEnvelope};
use sen2_core::InferenceRecord;
use serde_json::{json, Map, Value};
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output format selected with `--output_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Delimiter-separated values with a header row.
    #[default]
    Csv,
    /// Delimiter-separated values without a header row.
    #[value(name = "csv_no_hdr")]
    CsvNoHdr,
    /// JSON documents for machine consumption.
    Json,
    /// Aligned table for terminals.
    Table,
}

/// Output formatter trait.
///
/// Defines the interface for rendering command results in different output
/// formats. Every method returns the full text to print.
pub trait OutputFormatter {
    /// Formats inference records projected onto `id` plus `columns`.
    ///
    /// # Arguments
    /// * `records` - The records to format, in display order
    /// * `columns` - Columns to show after `id`
    fn format_records(&self, records: &[InferenceRecord], columns: &[&str]) -> String;

    /// Formats the number of matching records.
    fn format_count(&self, count: u64) -> String;

    /// Formats the ids touched by a mutating command.
    ///
    /// # Arguments
    /// * `action` - Command name, e.g. `rerun`
    /// * `ids` - Ids that were (or would be) changed
    /// * `dry_run` - Whether nothing was written
    fn format_ids(&self, action: &'static str, ids: &[u64], dry_run: bool) -> String;

    /// Formats the stored session: user, expiry and refresh window.
    fn format_session(&self, session: &SessionInfo, now: DateTime<Utc>) -> String;

    /// Formats an error for display on stderr.
    fn format_error(&self, error: &ErrorEnvelope) -> String;
}

/// Renders a JSON value as a single cell.
///
/// Strings are unquoted, `null` is empty, everything else is compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn past_tense(action: &str) -> &str {
    match action {
        "rerun" => "Restarted",
        "abort" => "Aborted",
        "delete" => "Deleted",
        "create" => "Created",
        _ => action,
    }
}

fn session_lines(session: &SessionInfo, now: DateTime<Utc>) -> Vec<String> {
    let status = &session.status;
    let mut lines = Vec::new();
    if !status.is_expired(now) {
        if let Some(user) = &session.username {
            lines.push(format!("Logged in as:  {}", user));
        }
        lines.push(format!("Expires at:    {}", status.expires_at));
        if let Some(until) = status.refresh_until {
            lines.push(format!("Refresh until: {}", until));
        }
    } else if status.can_refresh(now) {
        lines.push(format!("Token expired on: {}", status.expires_at));
        if let Some(until) = status.refresh_until {
            lines.push(format!("Refresh until:    {}", until));
        }
    } else {
        lines.push("Session expired.".to_string());
    }
    lines
}

/// CSV output formatter.
///
/// Fields containing the delimiter, a quote or a line break are quoted,
/// with embedded quotes doubled.
pub struct CsvFormatter {
    delimiter: char,
    header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter.
    ///
    /// # Arguments
    /// * `delimiter` - Field separator
    /// * `header` - Whether to emit the header row
    #[must_use]
    pub fn new(delimiter: char, header: bool) -> Self {
        Self { delimiter, header }
    }

    fn field(&self, text: &str) -> String {
        if text.contains(self.delimiter) || text.contains(['"', '\n', '\r']) {
            format!("\"{}\"", text.replace('"', "\"\""))
        } else {
            text.to_string()
        }
    }

    fn line<I>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = String>,
    {
        let fields: Vec<String> = fields.into_iter().map(|f| self.field(&f)).collect();
        fields.join(&self.delimiter.to_string())
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_records(&self, records: &[InferenceRecord], columns: &[&str]) -> String {
        if records.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(records.len() + 1);
        if self.header {
            lines.push(self.line(
                std::iter::once("id".to_string()).chain(columns.iter().map(|c| (*c).to_string())),
            ));
        }
        for record in records {
            lines.push(self.line(record.to_row(columns).iter().map(|(_, value)| cell_text(value))));
        }
        lines.join("\n")
    }

    fn format_count(&self, count: u64) -> String {
        count.to_string()
    }

    fn format_ids(&self, action: &'static str, ids: &[u64], dry_run: bool) -> String {
        let mut lines = Vec::with_capacity(ids.len() + 1);
        if self.header {
            lines.push(self.line(["id".to_string(), "action".to_string(), "dry_run".to_string()]));
        }
        for id in ids {
            lines.push(self.line([id.to_string(), action.to_string(), dry_run.to_string()]));
        }
        lines.join("\n")
    }

    fn format_session(&self, session: &SessionInfo, now: DateTime<Utc>) -> String {
        let status = &session.status;
        let mut lines = Vec::new();
        if self.header {
            lines.push(self.line([
                "token_file".to_string(),
                "username".to_string(),
                "expires_at".to_string(),
                "refresh_until".to_string(),
                "expired".to_string(),
            ]));
        }
        lines.push(self.line([
            session.token_file.clone(),
            session.username.clone().unwrap_or_default(),
            status.expires_at.to_rfc3339(),
            status.refresh_until.map(|t| t.to_rfc3339()).unwrap_or_default(),
            status.is_expired(now).to_string(),
        ]));
        lines.join("\n")
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!("Error: {}", error.message)
    }
}

/// JSON output formatter.
///
/// Formats results as valid JSON for machine consumption.
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty(value: &impl serde::Serialize) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_records(&self, records: &[InferenceRecord], columns: &[&str]) -> String {
        let rows: Vec<Value> = records
            .iter()
            .map(|record| Value::Object(record.to_row(columns).into_iter().collect::<Map<_, _>>()))
            .collect();
        Self::pretty(&json!({
            "inferences": rows,
            "total": records.len(),
        }))
    }

    fn format_count(&self, count: u64) -> String {
        Self::pretty(&SuccessEnvelope::new("count", json!({ "count": count })))
    }

    fn format_ids(&self, action: &'static str, ids: &[u64], dry_run: bool) -> String {
        Self::pretty(&SuccessEnvelope::new(
            action,
            json!({ "ids": ids, "dry_run": dry_run }),
        ))
    }

    fn format_session(&self, session: &SessionInfo, now: DateTime<Utc>) -> String {
        let status = &session.status;
        Self::pretty(&SuccessEnvelope::new(
            "session_info",
            json!({
                "token_file": session.token_file,
                "username": session.username,
                "expires_at": status.expires_at.to_rfc3339(),
                "refresh_until": status.refresh_until.map(|t| t.to_rfc3339()),
                "expired": status.is_expired(now),
                "can_refresh": status.can_refresh(now),
            }),
        ))
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        Self::pretty(&error.document())
    }
}

/// Table output formatter.
///
/// Formats results as human-readable tables with colors and alignment.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn marked(&self, mark: &str, color: Color, text: &str) -> String {
        if !self.use_color {
            return format!("{} {}", mark, text);
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{}", mark);
        let _ = buffer.reset();
        let _ = write!(buffer, " {}", text);
        String::from_utf8_lossy(buffer.as_slice()).to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_records(&self, records: &[InferenceRecord], columns: &[&str]) -> String {
        if records.is_empty() {
            return "No inferences found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(std::iter::once("id").chain(columns.iter().copied()));
        for record in records {
            builder.push_record(record.to_row(columns).iter().map(|(_, value)| cell_text(value)));
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_count(&self, count: u64) -> String {
        format!("Matching inferences: {}", count)
    }

    fn format_ids(&self, action: &'static str, ids: &[u64], dry_run: bool) -> String {
        if ids.is_empty() {
            return format!("No inferences eligible for {}.", action);
        }

        let ids = ids.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
        if dry_run {
            self.marked("ℹ", Color::Cyan, &format!("Dry run, would {}: {}", action, ids))
        } else {
            self.marked("✓", Color::Green, &format!("{} inferences: {}", past_tense(action), ids))
        }
    }

    fn format_session(&self, session: &SessionInfo, now: DateTime<Utc>) -> String {
        let mut lines = vec![format!("Token file:    {}", session.token_file)];
        lines.extend(session_lines(session, now));
        lines.join("\n")
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        self.marked("✗", Color::Red, &format!("Error: {}", error.message))
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (tables only)
/// * `delimiter` - CSV field separator
///
/// # Returns
/// A boxed OutputFormatter instance
#[must_use]
pub fn create_formatter(format: OutputFormat, use_color: bool, delimiter: char) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Csv => Box::new(CsvFormatter::new(delimiter, true)),
        OutputFormat::CsvNoHdr => Box::new(CsvFormatter::new(delimiter, false)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
    }
}
