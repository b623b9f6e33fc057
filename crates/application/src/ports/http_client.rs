//! HTTP client port

use async_trait::async_trait;
use thiserror::Error;

use covenant_domain::request::ResolvedRequest;
use covenant_domain::response::ResponseSnapshot;

/// Transport-level failures, kept distinct from contract violations.
///
/// A value of this type always means the HTTP exchange could not be
/// completed; a response with an unexpected status code is never an error
/// here. The harness does not retry any of these; a retry policy belongs to
/// whoever invokes it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL is invalid or uses an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be serialized for sending.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// The host that failed to resolve.
        host: String,
        /// Resolver error detail.
        message: String,
    },

    /// The remote host refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured redirect limit.
        max: usize,
    },

    /// The request was aborted before completion (run-level timeout).
    #[error("request cancelled: {0}")]
    Cancelled(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations must perform exactly one outbound request per call and
/// must return non-success statuses as ordinary snapshots; the expectation
/// decides whether a 404 is a failure or a passing negative case.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes the request and returns the observed response.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures (network, DNS,
    /// timeout), never for the status code of a completed exchange.
    async fn execute(&self, request: &ResolvedRequest)
    -> Result<ResponseSnapshot, HttpClientError>;
}
