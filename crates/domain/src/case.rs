//! Test cases and suites
//!
//! A test case pairs exactly one request description with exactly one
//! expectation. Cases are defined statically, executed once per run, and
//! discarded; no case mutates state another case reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expectation::Expectation;
use crate::request::RequestTemplate;

/// One request/expectation pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Case name, shown in the run report.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The request to issue.
    pub request: RequestTemplate,
    /// The contract the response must satisfy.
    pub expect: Expectation,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl TestCase {
    /// Creates a new test case.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestTemplate, expect: Expectation) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            request,
            expect,
        }
    }
}

/// A named list of independent test cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Suite {
    /// Suite name, shown in the run report.
    pub name: String,
    /// The cases to run.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl Suite {
    /// Creates a new empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Adds a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Returns the number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
