//! Declarative expectations
//!
//! An [`Expectation`] is the contract half of a test case: the status code
//! the remote service must answer with, plus structural assertions on the
//! decoded body. One shared verifier evaluates these values; test cases
//! never carry inline validation logic.

use serde::{Deserialize, Serialize};

/// Expected status code value or range.
///
/// Status equality is the sole success criterion from the harness's point of
/// view: a 404 is a valid, expected outcome for a negative test case, not an
/// error to unwind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// One of multiple status codes.
    OneOf(Vec<u16>),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
}

impl StatusExpectation {
    /// Checks whether a status code satisfies this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::OneOf(codes) => codes.contains(&status),
            Self::Range { min, max } => status >= *min && status <= *max,
        }
    }

    /// Human-readable description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes.join(", "))
            }
            Self::Range { min, max } => format!("in {min}-{max}"),
        }
    }

    /// The 2xx success range.
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Comparison operators for length assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Returns the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Applies the operator to two lengths.
    #[must_use]
    pub const fn compare(&self, actual: usize, expected: usize) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
        }
    }
}

/// A structural assertion on the decoded response body.
///
/// Field paths use a small JSONPath-like syntax: `$.field.nested`,
/// `$[0].name`, `$.items[2].id`. Array-index paths are how a case asserts
/// on the identity of a specific item under a requested sort direction or
/// page offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyAssertion {
    /// The body is a non-empty array, object, or string.
    NotEmpty,
    /// The body is an empty array.
    EmptyArray,
    /// The length of the body array (or string) satisfies a bound, such as
    /// "at most the requested page size".
    Length {
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        value: usize,
    },
    /// The value at a path equals the expected JSON value.
    FieldEquals {
        /// Path into the body (e.g., `$[0].name`).
        path: String,
        /// Expected value.
        expected: serde_json::Value,
    },
    /// The string value at a path matches a regex pattern.
    FieldMatches {
        /// Path into the body.
        path: String,
        /// Regex pattern to match.
        pattern: String,
    },
    /// The raw body text contains a substring.
    Contains {
        /// Text to search for.
        text: String,
    },
    /// The Content-Type header contains the expected value.
    ContentType {
        /// Expected content type (partial match).
        expected: String,
    },
}

impl BodyAssertion {
    /// Human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::NotEmpty => "body is non-empty".to_string(),
            Self::EmptyArray => "body is an empty array".to_string(),
            Self::Length { operator, value } => {
                format!("body length {} {value}", operator.symbol())
            }
            Self::FieldEquals { path, expected } => format!("{path} equals {expected}"),
            Self::FieldMatches { path, pattern } => format!("{path} matches /{pattern}/"),
            Self::Contains { text } => format!("body contains '{text}'"),
            Self::ContentType { expected } => format!("Content-Type contains '{expected}'"),
        }
    }
}

/// The declared contract for a single test case: one status expectation and
/// zero or more body assertions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Expectation {
    /// Expected status code.
    #[serde(default)]
    pub status: StatusExpectation,
    /// Structural assertions on the decoded body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<BodyAssertion>,
}

impl Expectation {
    /// Creates an expectation for an exact status with no body assertions.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self {
            status: StatusExpectation::Exact(code),
            body: Vec::new(),
        }
    }

    /// Adds a body assertion (builder pattern).
    #[must_use]
    pub fn with(mut self, assertion: BodyAssertion) -> Self {
        self.body.push(assertion);
        self
    }
}

/// Result of evaluating a single assertion against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionResult {
    /// What was checked.
    pub description: String,
    /// Whether the check held.
    pub passed: bool,
    /// Observed value, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Failure message (expected vs. observed) if the check failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssertionResult {
    /// Creates a passed result.
    #[must_use]
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Creates a passed result with the observed value.
    #[must_use]
    pub fn pass_with_value(description: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn fail(description: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Creates a failed result with the observed value.
    #[must_use]
    pub fn fail_with_value(
        description: impl Into<String>,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}
