//! Declarative request description

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, QueryParams, RequestBody};

/// The request half of a test case, as declared in a suite file.
///
/// The path is a template relative to the configured base URL; segments like
/// `{owner}` or `{commit_sha}` are substituted from the environment's
/// fixture map before the request is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Path template, e.g. `/users/{username}/repos`
    pub path: String,
    /// Query parameters appended to the resolved URL
    #[serde(default, skip_serializing_if = "QueryParams::is_empty")]
    pub query: QueryParams,
    /// Case-specific headers, overriding the harness defaults
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// Request body
    #[serde(default, skip_serializing_if = "RequestBody::is_empty")]
    pub body: RequestBody,
}

impl RequestTemplate {
    /// Creates a GET template for the given path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a POST template with a body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body,
        }
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(super::QueryParam::new(key, value));
        self
    }
}
