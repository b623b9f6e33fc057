//! Concrete, sendable request form

use url::Url;

use super::{Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// A request with all placeholders substituted and the URL parsed.
///
/// Produced from a [`super::RequestTemplate`] before any request is sent;
/// this is the only form the HTTP client port accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully resolved target URL, query included
    pub url: Url,
    /// Merged headers (harness defaults plus case overrides)
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ResolvedRequest {
    /// Validates the request before it is handed to a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is not http or https.
    pub fn validate(&self) -> DomainResult<()> {
        match self.url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{other}' in {}",
                self.url
            ))),
        }
    }
}
