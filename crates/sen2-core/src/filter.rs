// Rust guideline compliant 2026-10-15

//! Filter predicate construction.
//!
//! Every predicate built here uses the `in` operator. A predicate renders as
//! `{"name":"<field>","op":"in","val":[...]}` with string values quoted and
//! numbers bare; a filter expression is the JSON array of its predicates,
//! which the backend reads as a conjunction.

use crate::{Error, Result, Status};
use serde_json::{json, Value};
use std::fmt;

/// Operator used for every client-built predicate.
pub const OP_IN: &str = "in";

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Rendered unquoted.
    Int(i64),
    /// Rendered quoted.
    Str(String),
}

impl FilterValue {
    fn kind(&self) -> &'static str {
        match self {
            FilterValue::Int(_) => "integer",
            FilterValue::Str(_) => "string",
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FilterValue::Int(value) => Value::from(*value),
            FilterValue::Str(value) => Value::from(value.as_str()),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Str(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Str(value)
    }
}

impl From<Status> for FilterValue {
    fn from(value: Status) -> Self {
        FilterValue::Str(value.as_str().to_string())
    }
}

/// Value supplied for one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    /// No constraint on the field.
    Absent,
    /// A single scalar, treated as a one-element list.
    One(FilterValue),
    /// Any number of values.
    Many(Vec<FilterValue>),
    /// A value of a type filters cannot express; carries the type name.
    Unsupported(String),
}

impl FilterInput {
    /// Collects values into a `Many` input.
    pub fn many<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FilterValue>,
    {
        FilterInput::Many(values.into_iter().map(Into::into).collect())
    }

    /// Classifies loosely typed JSON input.
    ///
    /// Null is absent; integers and strings are scalars; arrays of those are
    /// lists. Floats, booleans, objects and nested arrays are unsupported.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FilterInput::Absent,
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match scalar_from_json(item) {
                        Ok(value) => values.push(value),
                        Err(kind) => return FilterInput::Unsupported(format!("array of {}", kind)),
                    }
                }
                FilterInput::Many(values)
            }
            other => match scalar_from_json(other) {
                Ok(value) => FilterInput::One(value),
                Err(kind) => FilterInput::Unsupported(kind.to_string()),
            },
        }
    }
}

fn scalar_from_json(value: &Value) -> std::result::Result<FilterValue, &'static str> {
    match value {
        Value::String(s) => Ok(FilterValue::Str(s.clone())),
        Value::Number(n) => n.as_i64().map(FilterValue::Int).ok_or("float"),
        Value::Bool(_) => Err("boolean"),
        Value::Null => Err("null"),
        Value::Array(_) => Err("array"),
        Value::Object(_) => Err("object"),
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterInput {
    fn from(values: Vec<T>) -> Self {
        FilterInput::many(values)
    }
}

impl From<FilterValue> for FilterInput {
    fn from(value: FilterValue) -> Self {
        FilterInput::One(value)
    }
}

/// A `field in [values]` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate {
    name: String,
    values: Vec<FilterValue>,
}

impl FilterPredicate {
    /// Field the predicate constrains.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operator; always `in` for client-built predicates.
    #[must_use]
    pub fn op(&self) -> &'static str {
        OP_IN
    }

    #[must_use]
    pub fn values(&self) -> &[FilterValue] {
        &self.values
    }

    /// JSON form sent to the backend.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "op": OP_IN,
            "val": self.values.iter().map(FilterValue::to_json).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Builds the predicate for one field.
///
/// # Arguments
///
/// * `field` - Field name as known to the backend
/// * `input` - Value(s) to match
///
/// # Returns
///
/// `Ok(None)` when the field is unconstrained (absent or empty input) or the
/// input type is unsupported; the latter is logged.
///
/// # Errors
///
/// Returns a validation error if a list mixes integers and strings.
pub fn build_predicate(field: &str, input: impl Into<FilterInput>) -> Result<Option<FilterPredicate>> {
    let values = match input.into() {
        FilterInput::Absent => return Ok(None),
        FilterInput::One(value) => vec![value],
        FilterInput::Many(values) => values,
        FilterInput::Unsupported(kind) => {
            tracing::warn!(field, kind = %kind, "filter value type not supported, ignoring field");
            return Ok(None);
        }
    };

    let Some(first) = values.first() else {
        tracing::debug!(field, "empty filter list, field left unconstrained");
        return Ok(None);
    };

    if let Some(other) = values.iter().find(|value| value.kind() != first.kind()) {
        return Err(Error::Validation(format!(
            "Filter '{}' mixes {} and {} values",
            field,
            first.kind(),
            other.kind()
        )));
    }

    let predicate = FilterPredicate {
        name: field.to_string(),
        values,
    };
    tracing::debug!(predicate = %predicate, "built filter predicate");
    Ok(Some(predicate))
}

/// Whether a command may run with no filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRequirement {
    /// Listing: an empty filter matches every record.
    Optional,
    /// Mutations: an empty filter is refused.
    Required,
}

/// Conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    predicates: Vec<FilterPredicate>,
}

impl FilterExpression {
    /// Expression that matches every record.
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let array = Value::Array(self.predicates.iter().map(FilterPredicate::to_json).collect());
        write!(f, "{}", array)
    }
}

/// Combines built predicates into one expression, skipping absent ones.
///
/// # Errors
///
/// Returns a validation error if `requirement` is `Required` and no
/// predicate remains.
pub fn combine<I>(predicates: I, requirement: FilterRequirement) -> Result<FilterExpression>
where
    I: IntoIterator<Item = Option<FilterPredicate>>,
{
    let predicates: Vec<FilterPredicate> = predicates.into_iter().flatten().collect();
    if predicates.is_empty() && requirement == FilterRequirement::Required {
        return Err(Error::Validation(
            "At least one filter argument needs to be given.".to_string(),
        ));
    }
    Ok(FilterExpression { predicates })
}
