//! Harness configuration
//!
//! Everything environment-specific lives here: the base URL, the bearer
//! credential, the fixed header set, and the fixture values substituted into
//! path templates. Account-specific values (a username, a commit hash) are
//! test-environment coupling and must come from this config, never from a
//! committed suite file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use covenant_domain::request::{Header, Headers};

/// Environment variable carrying the bearer credential.
pub const TOKEN_ENV: &str = "COVENANT_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "COVENANT_BASE_URL";

/// Configuration failures. All of these are fatal: the run aborts before any
/// request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No credential was supplied.
    #[error("credential is not configured; set `token` in the config file or {TOKEN_ENV}")]
    MissingCredential,

    /// The base URL does not parse.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Parser detail.
        message: String,
    },

    /// A template references a placeholder with no fixture value.
    #[error("case '{case}' references unknown placeholder '{name}'")]
    UnknownPlaceholder {
        /// The case whose template failed to resolve.
        case: String,
        /// The missing placeholder name.
        name: String,
    },

    /// A template resolved to something that is not a URL.
    #[error("case '{case}' resolves to an invalid URL: {message}")]
    InvalidResolvedUrl {
        /// The case whose URL failed to parse.
        case: String,
        /// Parser detail.
        message: String,
    },
}

/// Per-environment harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base URL every path template is resolved against.
    pub base_url: String,
    /// Opaque bearer credential. Usually injected via [`TOKEN_ENV`] rather
    /// than written to the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Authorization scheme prefix (e.g., "Bearer" or "token").
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    /// Fixed `Accept` header value sent with every request.
    #[serde(default = "default_accept")]
    pub accept: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Fixture values substituted for `{placeholder}` references.
    #[serde(default)]
    pub fixtures: HashMap<String, String>,
}

fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

fn default_accept() -> String {
    "application/vnd.github.v3+json".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl HarnessConfig {
    /// Creates a config with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            auth_scheme: default_auth_scheme(),
            accept: default_accept(),
            timeout_ms: default_timeout_ms(),
            fixtures: HashMap::new(),
        }
    }

    /// Applies process-environment overrides ([`TOKEN_ENV`],
    /// [`BASE_URL_ENV`]) on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup. The lookup wins over the
    /// file for every key it returns.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
    }

    /// Parses and returns the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value does not parse.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })
    }

    /// Builds the fixed header set sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if no token is configured.
    pub fn default_headers(&self) -> Result<Headers, ConfigError> {
        let token = self.token.as_deref().ok_or(ConfigError::MissingCredential)?;
        Ok([
            Header::new("Accept", self.accept.clone()),
            Header::new("Authorization", format!("{} {token}", self.auth_scheme)),
        ]
        .into_iter()
        .collect())
    }

    /// Looks up a fixture value.
    #[must_use]
    pub fn fixture(&self, name: &str) -> Option<&str> {
        self.fixtures.get(name).map(String::as_str)
    }
}
