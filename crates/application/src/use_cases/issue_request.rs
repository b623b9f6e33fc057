//! Issue Request use case
//!
//! Performs the single HTTP call a test case is entitled to. No retries:
//! retrying a contract mismatch would mask a real regression, and
//! transport-retry policy belongs to the caller.

use std::sync::Arc;

use tokio::time::Instant;

use covenant_domain::request::ResolvedRequest;
use covenant_domain::response::ResponseSnapshot;

use crate::ports::{HttpClient, HttpClientError};

/// Use case for issuing one request through the HTTP client port.
pub struct IssueRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Clone for IssueRequest<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> IssueRequest<C> {
    /// Creates the use case with the given HTTP client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Validates and sends the request, returning the observed snapshot.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange cannot be completed; a
    /// completed exchange with any status code is `Ok`.
    pub async fn issue(
        &self,
        request: &ResolvedRequest,
    ) -> Result<ResponseSnapshot, HttpClientError> {
        request
            .validate()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        self.client.execute(request).await
    }

    /// Like [`IssueRequest::issue`], but aborts at `deadline` (the run-level
    /// timeout). An aborted request surfaces as
    /// [`HttpClientError::Cancelled`] so the report classifies it as a
    /// transport failure, never a contract violation.
    ///
    /// # Errors
    ///
    /// Returns a transport error on failure or when the deadline elapses.
    pub async fn issue_until(
        &self,
        request: &ResolvedRequest,
        deadline: Instant,
    ) -> Result<ResponseSnapshot, HttpClientError> {
        request
            .validate()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        tokio::select! {
            result = self.client.execute(request) => result,
            () = tokio::time::sleep_until(deadline) => {
                Err(HttpClientError::Cancelled("run timeout elapsed".to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use covenant_domain::request::{Headers, HttpMethod, RequestBody};
    use url::Url;

    /// Mock HTTP client returning a canned result.
    struct MockHttpClient {
        response: Result<ResponseSnapshot, HttpClientError>,
        delay: Option<Duration>,
    }

    impl MockHttpClient {
        fn success(status: u16) -> Self {
            Self {
                response: Ok(ResponseSnapshot::new(
                    status,
                    HashMap::new(),
                    b"[]".to_vec(),
                    Duration::from_millis(5),
                )),
                delay: None,
            }
        }

        fn slow(delay: Duration) -> Self {
            let mut mock = Self::success(200);
            mock.delay = Some(delay);
            mock
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn execute(
            &self,
            _request: &ResolvedRequest,
        ) -> Result<ResponseSnapshot, HttpClientError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone()
        }
    }

    fn request(url: &str) -> ResolvedRequest {
        ResolvedRequest {
            method: HttpMethod::Get,
            url: Url::parse(url).unwrap(),
            headers: Headers::new(),
            body: RequestBody::None,
            timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn test_issue_returns_snapshot() {
        let use_case = IssueRequest::new(Arc::new(MockHttpClient::success(404)));
        let snapshot = use_case
            .issue(&request("https://api.github.com/users/nobody/repos"))
            .await
            .unwrap();
        // A 404 completes the exchange; it is not a transport error.
        assert_eq!(snapshot.status, 404);
    }

    #[tokio::test]
    async fn test_issue_rejects_bad_scheme() {
        let use_case = IssueRequest::new(Arc::new(MockHttpClient::success(200)));
        let result = use_case.issue(&request("ftp://example.com/x")).await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cancels_pending_request() {
        let use_case = IssueRequest::new(Arc::new(MockHttpClient::slow(Duration::from_secs(60))));
        let deadline = Instant::now() + Duration::from_millis(50);
        let result = use_case
            .issue_until(&request("https://api.github.com/users/octocat/repos"), deadline)
            .await;
        assert!(matches!(result, Err(HttpClientError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_deadline_in_future_does_not_cancel() {
        let use_case = IssueRequest::new(Arc::new(MockHttpClient::success(200)));
        let deadline = Instant::now() + Duration::from_secs(5);
        let result = use_case
            .issue_until(&request("https://api.github.com/users/octocat/repos"), deadline)
            .await;
        assert!(result.is_ok());
    }
}
