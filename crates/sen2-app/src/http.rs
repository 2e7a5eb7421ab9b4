// Rust guideline compliant 2026-10-16

//! Blocking JSON:API client over `ureq`.

use crate::client::{Page, ResourceClient, TransportError};
use crate::document::{self, JSONAPI_MEDIA_TYPE};
use crate::token::BearerToken;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sen2_core::{QueryParam, QuerySpec, Status};
use serde_json::Value;
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};

/// Characters left as-is in builder keys and values (RFC 3986 unreserved).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Session against one backend, authorized with one token.
///
/// The underlying agent and its connection pool are released on drop.
pub struct JsonApiClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl JsonApiClient {
    /// Creates a client for `base_url` (e.g. `https://api.sen2cube.at/v1`).
    #[must_use]
    pub fn new(base_url: &str, token: &BearerToken, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: token.authorization(),
        }
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Collection URL with the query appended in wire order.
    fn query_url(&self, resource: &str, query: &QuerySpec) -> String {
        let parts: Vec<String> = query
            .params()
            .into_iter()
            .map(|param| match param {
                QueryParam::Pair(key, value) => format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(&value, QUERY_COMPONENT)
                ),
                QueryParam::Raw(raw) => raw,
            })
            .collect();

        let url = self.collection_url(resource);
        if parts.is_empty() {
            url
        } else {
            format!("{}?{}", url, parts.join("&"))
        }
    }

    fn resource_url(&self, resource: &str, id: u64) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    fn read_document(
        &self,
        result: Result<Response<Body>, ureq::Error>,
    ) -> Result<Option<Value>, TransportError> {
        let mut response = result.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;

        if !(200..300).contains(&status) {
            let message = document::error_message(&body);
            tracing::debug!(status, message = %message, "backend rejected request");
            return Err(TransportError::Status { status, message });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| TransportError::Document(format!("invalid JSON: {}", e)))
    }

    fn read_page(&self, result: Result<Response<Body>, ureq::Error>) -> Result<Page, TransportError> {
        let document = self
            .read_document(result)?
            .ok_or_else(|| TransportError::Document("empty collection response".to_string()))?;
        document::page_from_document(&document)
    }
}

pub(crate) fn transport_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::StatusCode(status) => TransportError::Status {
            status,
            message: String::new(),
        },
        other => TransportError::Network(other.to_string()),
    }
}

impl ResourceClient for JsonApiClient {
    fn fetch(&self, resource: &str, query: &QuerySpec) -> Result<Page, TransportError> {
        let url = self.query_url(resource, query);
        tracing::debug!(url = %url, query = %query, "fetching collection");

        let result = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", JSONAPI_MEDIA_TYPE)
            .call();
        self.read_page(result)
    }

    fn fetch_next(&self, next: &str) -> Result<Page, TransportError> {
        tracing::debug!(url = %next, "following continuation link");
        let result = self
            .agent
            .get(next)
            .header("Authorization", &self.authorization)
            .header("Accept", JSONAPI_MEDIA_TYPE)
            .call();
        self.read_page(result)
    }

    fn update_status(&self, resource: &str, id: u64, status: Status) -> Result<(), TransportError> {
        let body = document::status_patch(resource, id, status).to_string();
        let result = self
            .agent
            .patch(&self.resource_url(resource, id))
            .header("Authorization", &self.authorization)
            .header("Accept", JSONAPI_MEDIA_TYPE)
            .header("Content-Type", JSONAPI_MEDIA_TYPE)
            .send(body.as_bytes());
        self.read_document(result)?;
        Ok(())
    }

    fn delete(&self, resource: &str, id: u64) -> Result<(), TransportError> {
        let result = self
            .agent
            .delete(&self.resource_url(resource, id))
            .header("Authorization", &self.authorization)
            .header("Accept", JSONAPI_MEDIA_TYPE)
            .call();
        self.read_document(result)?;
        Ok(())
    }

    fn create(&self, resource: &str, document: &Value) -> Result<u64, TransportError> {
        let body = document.to_string();
        let result = self
            .agent
            .post(&self.collection_url(resource))
            .header("Authorization", &self.authorization)
            .header("Accept", JSONAPI_MEDIA_TYPE)
            .header("Content-Type", JSONAPI_MEDIA_TYPE)
            .send(body.as_bytes());
        let created = self
            .read_document(result)?
            .ok_or_else(|| TransportError::Document("empty create response".to_string()))?;
        document::created_id(&created)
    }
}
