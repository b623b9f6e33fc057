//! Request body types
//!
//! A body payload may be any JSON value, not just a well-formed object: a
//! negative test case can deliberately send a bare string where the remote
//! API expects a structured document, to exercise its input validation.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// A JSON payload of arbitrary shape, sent as `application/json`.
    Json {
        /// The payload value (object, array, string, number, ...)
        value: serde_json::Value,
    },
    /// Raw text with an explicit content type.
    Text {
        /// The body content
        content: String,
        /// The declared content type (e.g., "text/plain")
        content_type: String,
    },
}

impl RequestBody {
    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> DomainResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::Json { value })
    }

    /// Creates a JSON body from an already-built value.
    #[must_use]
    pub const fn json_value(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            content_type: "text/plain".to_string(),
        }
    }

    /// Returns whether there is no payload to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type to declare, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
            Self::Text { content_type, .. } => Some(content_type),
        }
    }

    /// Serializes the payload to the bytes that go on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON payload cannot be serialized.
    pub fn to_wire(&self) -> DomainResult<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Json { value } => serde_json::to_string(value)
                .map(Some)
                .map_err(|e| DomainError::InvalidBody(e.to_string())),
            Self::Text { content, .. } => Ok(Some(content.clone())),
        }
    }
}
