// Rust guideline compliant 2026-10-16

//! Application services for sen2cli.
//!
//! This crate talks to the inference backend: it reads the stored session
//! token, runs paginated collection queries, applies guarded status
//! mutations and creates new inferences. Backend calls go through the
//! [`ResourceClient`] trait so that services can run against an in-memory
//! backend in tests. The identity provider is only asked who the session
//! belongs to.

pub mod client;
pub mod create;
pub mod document;
pub mod error;
pub mod executor;
pub mod http;
pub mod mutation;
pub mod response;
pub mod session;
pub mod token;

pub use client::{Page, ResourceClient, TransportError};
pub use create::{create_document, create_inference};
pub use error::{AppError, ErrorCode, Result};
pub use executor::{execute, QueryOutcome};
pub use http::JsonApiClient;
pub use mutation::{apply, update_records};
pub use response::{ErrorDocument, ErrorEnvelope, SuccessEnvelope};
pub use session::{fetch_user_info, session_info, SessionInfo, UserInfo};
pub use token::{BearerToken, TokenFile, TokenProvider, TokenStatus};

/// Resource type of inferences on the backend.
pub const INFERENCE_RESOURCE: &str = "inference";
