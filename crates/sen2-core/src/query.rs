// Rust guideline compliant 2026-10-15

//! Structured JSON:API query.
//!
//! A `QuerySpec` is built once per command and only turned into strings at
//! the wire boundary. Parameters are always emitted in the same order:
//! `filter`, `sort`, raw modifier, `page[size]`, `page[number]`.

use crate::filter::FilterExpression;
use std::fmt;

/// Filter, sort and pagination parameters of a collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    filter: FilterExpression,
    sort: Option<String>,
    raw_modifier: Option<String>,
    page_size: Option<u32>,
    page_number: Option<i64>,
}

/// Assembles a query from its parts.
///
/// # Arguments
///
/// * `filter` - Combined filter expression (may match all)
/// * `sort` - Comma-separated fields, `-` prefix for descending
/// * `raw_modifier` - Query-string fragment appended verbatim
/// * `page_size` - Page size, always emitted when set
/// * `page_number` - Page to fetch; `<= 0` or `None` means all pages
#[must_use]
pub fn compose_query(
    filter: FilterExpression,
    sort: Option<String>,
    raw_modifier: Option<String>,
    page_size: Option<u32>,
    page_number: Option<i64>,
) -> QuerySpec {
    QuerySpec {
        filter,
        sort: sort.filter(|s| !s.trim().is_empty()),
        raw_modifier: raw_modifier.filter(|s| !s.trim().is_empty()),
        page_size,
        page_number,
    }
}

impl QuerySpec {
    #[must_use]
    pub fn filter(&self) -> &FilterExpression {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    #[must_use]
    pub fn raw_modifier(&self) -> Option<&str> {
        self.raw_modifier.as_deref()
    }

    #[must_use]
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Explicitly requested page, if positive.
    #[must_use]
    pub fn page_number(&self) -> Option<i64> {
        self.page_number.filter(|n| *n > 0)
    }

    /// True when every page should be fetched by following continuation links.
    #[must_use]
    pub fn follows_continuations(&self) -> bool {
        self.page_number().is_none()
    }

    /// Returns the query parameters in wire order.
    ///
    /// The raw modifier stays one opaque fragment; only the builder pairs
    /// are meant to be encoded on the way out.
    #[must_use]
    pub fn params(&self) -> Vec<QueryParam> {
        let mut params = Vec::new();

        if !self.filter.is_empty() {
            params.push(QueryParam::Pair("filter", self.filter.to_string()));
        }

        if let Some(sort) = &self.sort {
            params.push(QueryParam::Pair("sort", sort.clone()));
        }

        if let Some(raw) = &self.raw_modifier {
            params.push(QueryParam::Raw(raw.trim_start_matches(['?', '&']).to_string()));
        }

        if let Some(size) = self.page_size {
            params.push(QueryParam::Pair("page[size]", size.to_string()));
        }

        if let Some(number) = self.page_number() {
            params.push(QueryParam::Pair("page[number]", number.to_string()));
        }

        params
    }
}

/// One entry of a serialized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Builder-generated key and unencoded value.
    Pair(&'static str, String),
    /// Caller-supplied fragment, already in wire form.
    Raw(String),
}

impl QueryParam {
    /// Key of a builder pair; `None` for a raw fragment.
    #[must_use]
    pub fn key(&self) -> Option<&'static str> {
        match self {
            QueryParam::Pair(key, _) => Some(key),
            QueryParam::Raw(_) => None,
        }
    }
}

/// Unencoded query string, for logs and diagnostics.
impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .params()
            .into_iter()
            .map(|param| match param {
                QueryParam::Pair(key, value) => format!("{}={}", key, value),
                QueryParam::Raw(raw) => raw,
            })
            .collect();
        f.write_str(&rendered.join("&"))
    }
}
