// Rust guideline compliant 2026-10-15

//! Seam between the application services and the remote backend.

use sen2_core::{InferenceRecord, QuerySpec, Status};
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection-level failure (DNS, TLS, refused, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// The response was not a usable JSON:API document.
    #[error("malformed document: {0}")]
    Document(String),
}

/// One page of a collection response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records on this page, in backend sort order.
    pub records: Vec<InferenceRecord>,
    /// Total number of matches across all pages, when reported.
    pub total: Option<u64>,
    /// Continuation link to the next page.
    pub next: Option<String>,
}

/// Remote resource operations used by the services.
///
/// Implementations own whatever session state the transport needs and
/// release it when dropped.
pub trait ResourceClient {
    /// Fetches the first page of `resource` matching `query`.
    fn fetch(&self, resource: &str, query: &QuerySpec) -> Result<Page, TransportError>;

    /// Fetches the page behind a continuation link.
    fn fetch_next(&self, next: &str) -> Result<Page, TransportError>;

    /// Writes a new status to one resource.
    fn update_status(&self, resource: &str, id: u64, status: Status) -> Result<(), TransportError>;

    /// Deletes one resource.
    fn delete(&self, resource: &str, id: u64) -> Result<(), TransportError>;

    /// Creates a resource from a JSON:API document and returns its id.
    fn create(&self, resource: &str, document: &serde_json::Value) -> Result<u64, TransportError>;
}
