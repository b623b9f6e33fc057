//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port with `reqwest::Client`.
//! Non-success statuses never raise here: a completed exchange is returned
//! as a snapshot whatever its code, so an expectation can treat a 404 as a
//! passing negative case.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};

use covenant_application::ports::{HttpClient, HttpClientError};
use covenant_domain::request::{HttpMethod, ResolvedRequest};
use covenant_domain::response::ResponseSnapshot;

const MAX_REDIRECTS: usize = 10;

/// HTTP client adapter backed by reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with the harness defaults: rustls, a fixed
    /// User-Agent, and a bounded redirect policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("covenant/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps a pre-built reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain method to a reqwest method.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the body payload, declaring its content type unless the
    /// request already carries one.
    fn build_body(
        mut builder: reqwest::RequestBuilder,
        request: &ResolvedRequest,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let body = &request.body;
        let Some(wire) = body
            .to_wire()
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?
        else {
            return Ok(builder);
        };

        if let Some(content_type) = body.content_type() {
            if request.headers.get("content-type").is_none() {
                builder = builder.header("Content-Type", content_type);
            }
        }
        Ok(builder.body(wire))
    }

    /// Maps reqwest errors onto the transport taxonomy.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error.url().and_then(url::Url::port_or_known_default).unwrap_or(0),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: &ResolvedRequest,
    ) -> Result<ResponseSnapshot, HttpClientError> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(
                Self::to_reqwest_method(request.method),
                request.url.clone(),
            )
            .timeout(Duration::from_millis(request.timeout_ms));

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        builder = Self::build_body(builder, request)?;

        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, request.timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(ResponseSnapshot::new(status, headers, body, start.elapsed()))
    }
}
