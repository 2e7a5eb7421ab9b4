// Rust guideline compliant 2026-10-17

//! Filter, sort and paging options shared by the `inference` subcommands.

use sen2_core::{
    build_predicate, combine, compose_query, FilterExpression, FilterInput, FilterRequirement,
    QuerySpec, Result, Status,
};
use serde_json::Value;

/// Record filters. Values of one option are OR-ed, options are AND-ed.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Filter for inference ID
    #[arg(long = "id", value_name = "ID")]
    pub id: Vec<i64>,

    /// Filter for factbase ID
    #[arg(long = "factbase_id", value_name = "ID")]
    pub factbase_id: Vec<i64>,

    /// Filter for model (knowledgebase) ID
    #[arg(long = "knowledgebase_id", value_name = "ID")]
    pub knowledgebase_id: Vec<i64>,

    /// Filter for status
    #[arg(long, value_parser = parse_status)]
    pub status: Vec<Status>,

    /// Filter any attribute, e.g. owner='"alice"' or comment='["a","b"]'
    #[arg(long = "filter", value_name = "NAME=JSON", value_parser = parse_field_filter)]
    pub filter: Vec<(String, Value)>,

    /// Appended to the query string, for filters the options above cannot express
    #[arg(long = "raw_modifier", value_name = "QUERY")]
    pub raw_modifier: Option<String>,
}

impl FilterArgs {
    /// Builds the filter expression for these options.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `requirement` is `Required` and no
    /// filter option was given, or a generic filter mixes value types.
    pub fn expression(&self, requirement: FilterRequirement) -> Result<FilterExpression> {
        let mut predicates = vec![
            build_predicate("id", self.id.clone())?,
            build_predicate("factbase_id", self.factbase_id.clone())?,
            build_predicate("knowledgebase_id", self.knowledgebase_id.clone())?,
            build_predicate("status", self.status.clone())?,
        ];
        for (name, value) in &self.filter {
            predicates.push(build_predicate(name, FilterInput::from_json(value))?);
        }
        combine(predicates, requirement)
    }
}

/// Sort and paging options.
#[derive(Debug, Clone, clap::Args)]
pub struct QueryArgs {
    /// Columns to sort by, `-` for descending. Example: owner,-knowledgebase_id
    #[arg(long, default_value = "-id")]
    pub sort: String,

    /// Number of records per page
    #[arg(long = "page_size")]
    pub page_size: Option<u32>,

    /// Fetch only this page; 0 fetches all pages
    #[arg(long = "page_number", default_value_t = 0)]
    pub page_number: i64,
}

impl Default for QueryArgs {
    fn default() -> Self {
        Self {
            sort: "-id".to_string(),
            page_size: None,
            page_number: 0,
        }
    }
}

impl QueryArgs {
    /// Combines these options with the filters into one query.
    ///
    /// # Errors
    ///
    /// Returns the error of [`FilterArgs::expression`].
    pub fn compose(
        &self,
        filters: &FilterArgs,
        requirement: FilterRequirement,
    ) -> Result<QuerySpec> {
        Ok(compose_query(
            filters.expression(requirement)?,
            Some(self.sort.clone()),
            filters.raw_modifier.clone(),
            self.page_size,
            Some(self.page_number),
        ))
    }
}

fn parse_status(value: &str) -> std::result::Result<Status, String> {
    value.parse::<Status>().map_err(|e| e.to_string())
}

/// Parses `NAME=JSON`; a value that is not JSON is taken as a string.
fn parse_field_filter(value: &str) -> std::result::Result<(String, Value), String> {
    let (name, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=JSON, got '{}'", value))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", value));
    }
    let parsed = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), parsed))
}
