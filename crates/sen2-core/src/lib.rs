// Rust guideline compliant 2026-10-14

//! sen2cli Core Library
//!
//! This crate provides the foundational components for the sen2cli client:
//! - Data models (InferenceRecord, Status, InferenceDraft)
//! - Filter predicate construction and combination
//! - Structured JSON:API query parameters
//! - Status transition allow-lists
//! - Configuration loading
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod filter;
pub mod fsm;
pub mod models;
pub mod query;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{
    build_predicate, combine, FilterExpression, FilterInput, FilterPredicate, FilterRequirement,
    FilterValue,
};
pub use fsm::{allow_list, is_allowed, TransitionTarget};
pub use models::{InferenceDraft, InferenceRecord, Status, DEFAULT_COLUMNS};
pub use query::{compose_query, QueryParam, QuerySpec};
