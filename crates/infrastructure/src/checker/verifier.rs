//! Expectation verifier
//!
//! Evaluates a declared expectation against an observed response and
//! produces one result per check, failed results carrying the expected
//! vs. observed detail.

use regex::Regex;

use covenant_domain::expectation::{
    AssertionResult, BodyAssertion, ComparisonOperator, Expectation, StatusExpectation,
};
use covenant_domain::response::ResponseSnapshot;

/// Shared verifier for all test cases.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContractChecker;

impl ContractChecker {
    /// Creates a checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates the full expectation: the status check first, then every
    /// body assertion. All results are returned, passed and failed alike.
    #[must_use]
    pub fn check(&self, expectation: &Expectation, response: &ResponseSnapshot) -> Vec<AssertionResult> {
        let mut results = Vec::with_capacity(1 + expectation.body.len());
        results.push(self.check_status(&expectation.status, response));
        for assertion in &expectation.body {
            results.push(self.check_assertion(assertion, response));
        }
        results
    }

    /// Evaluates the status expectation.
    #[must_use]
    pub fn check_status(
        &self,
        expected: &StatusExpectation,
        response: &ResponseSnapshot,
    ) -> AssertionResult {
        let description = format!("status {}", expected.description());
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(description, actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                description,
                actual.to_string(),
                format!(
                    "expected status {}, got {}",
                    expected.description(),
                    response.status_code()
                ),
            )
        }
    }

    /// Evaluates a single body assertion.
    #[must_use]
    pub fn check_assertion(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
    ) -> AssertionResult {
        match assertion {
            BodyAssertion::NotEmpty => self.check_not_empty(assertion, response),
            BodyAssertion::EmptyArray => self.check_empty_array(assertion, response),
            BodyAssertion::Length { operator, value } => {
                self.check_length(assertion, response, *operator, *value)
            }
            BodyAssertion::FieldEquals { path, expected } => {
                self.check_field_equals(assertion, response, path, expected)
            }
            BodyAssertion::FieldMatches { path, pattern } => {
                self.check_field_matches(assertion, response, path, pattern)
            }
            BodyAssertion::Contains { text } => self.check_contains(assertion, response, text),
            BodyAssertion::ContentType { expected } => {
                self.check_content_type(assertion, response, expected)
            }
        }
    }

    fn check_not_empty(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
    ) -> AssertionResult {
        let empty = match response.body_json() {
            Some(serde_json::Value::Array(items)) => items.is_empty(),
            Some(serde_json::Value::Object(map)) => map.is_empty(),
            Some(serde_json::Value::String(s)) => s.is_empty(),
            Some(serde_json::Value::Null) => true,
            Some(_) => false,
            None => response.body.trim().is_empty(),
        };

        if empty {
            AssertionResult::fail(assertion.description(), "body is empty")
        } else {
            AssertionResult::pass(assertion.description())
        }
    }

    fn check_empty_array(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
    ) -> AssertionResult {
        match response.body_json() {
            Some(serde_json::Value::Array(items)) => {
                if items.is_empty() {
                    AssertionResult::pass(assertion.description())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.description(),
                        items.len().to_string(),
                        format!("expected an empty array, got {} items", items.len()),
                    )
                }
            }
            Some(other) => AssertionResult::fail_with_value(
                assertion.description(),
                json_kind(&other),
                "expected an array body",
            ),
            None => AssertionResult::fail(assertion.description(), "body is not valid JSON"),
        }
    }

    fn check_length(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
        operator: ComparisonOperator,
        expected: usize,
    ) -> AssertionResult {
        match response.body_json() {
            Some(serde_json::Value::Array(items)) => {
                let actual = items.len();
                if operator.compare(actual, expected) {
                    AssertionResult::pass_with_value(assertion.description(), actual.to_string())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.description(),
                        actual.to_string(),
                        format!(
                            "expected length {} {expected}, got {actual}",
                            operator.symbol()
                        ),
                    )
                }
            }
            Some(other) => AssertionResult::fail_with_value(
                assertion.description(),
                json_kind(&other),
                "expected an array body",
            ),
            None => AssertionResult::fail(assertion.description(), "body is not valid JSON"),
        }
    }

    fn check_field_equals(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
        path: &str,
        expected: &serde_json::Value,
    ) -> AssertionResult {
        let Some(json) = response.body_json() else {
            return AssertionResult::fail(assertion.description(), "body is not valid JSON");
        };

        match super::query_path(&json, path) {
            Ok(Some(value)) => {
                if &value == expected {
                    AssertionResult::pass_with_value(assertion.description(), value.to_string())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.description(),
                        value.to_string(),
                        format!("expected {expected} at {path}, got {value}"),
                    )
                }
            }
            Ok(None) => {
                AssertionResult::fail(assertion.description(), format!("{path} not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.description(),
                format!("invalid path '{path}': {e}"),
            ),
        }
    }

    fn check_field_matches(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
        path: &str,
        pattern: &str,
    ) -> AssertionResult {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.description(),
                    format!("invalid pattern '{pattern}': {e}"),
                );
            }
        };

        let Some(json) = response.body_json() else {
            return AssertionResult::fail(assertion.description(), "body is not valid JSON");
        };

        match super::query_path(&json, path) {
            Ok(Some(serde_json::Value::String(value))) => {
                if regex.is_match(&value) {
                    AssertionResult::pass_with_value(assertion.description(), value)
                } else {
                    AssertionResult::fail_with_value(
                        assertion.description(),
                        value.clone(),
                        format!("'{value}' does not match /{pattern}/"),
                    )
                }
            }
            Ok(Some(other)) => AssertionResult::fail_with_value(
                assertion.description(),
                other.to_string(),
                format!("{path} is not a string"),
            ),
            Ok(None) => {
                AssertionResult::fail(assertion.description(), format!("{path} not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.description(),
                format!("invalid path '{path}': {e}"),
            ),
        }
    }

    fn check_contains(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
        text: &str,
    ) -> AssertionResult {
        if response.body.contains(text) {
            AssertionResult::pass(assertion.description())
        } else {
            AssertionResult::fail_with_value(
                assertion.description(),
                preview(&response.body),
                format!("body does not contain '{text}'"),
            )
        }
    }

    fn check_content_type(
        &self,
        assertion: &BodyAssertion,
        response: &ResponseSnapshot,
        expected: &str,
    ) -> AssertionResult {
        match &response.content_type {
            Some(actual) if actual.contains(expected) => {
                AssertionResult::pass_with_value(assertion.description(), actual.clone())
            }
            Some(actual) => AssertionResult::fail_with_value(
                assertion.description(),
                actual.clone(),
                format!("Content-Type '{actual}' does not contain '{expected}'"),
            ),
            None => {
                AssertionResult::fail(assertion.description(), "no Content-Type header present")
            }
        }
    }
}

/// Short preview of a body for failure messages.
fn preview(body: &str) -> String {
    const LIMIT: usize = 100;
    if body.len() > LIMIT {
        let mut end = LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn json_response(status: u16, body: &str) -> ResponseSnapshot {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSnapshot::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    #[test]
    fn test_status_exact() {
        let checker = ContractChecker::new();
        let response = json_response(404, "{}");

        let result = checker.check_status(&StatusExpectation::Exact(404), &response);
        assert!(result.passed);

        let result = checker.check_status(&StatusExpectation::Exact(200), &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("404"));
    }

    #[test]
    fn test_status_one_of() {
        let checker = ContractChecker::new();
        let response = json_response(422, "{}");
        let result = checker.check_status(&StatusExpectation::OneOf(vec![404, 422]), &response);
        assert!(result.passed);
    }

    #[test]
    fn test_not_empty() {
        let checker = ContractChecker::new();

        let result =
            checker.check_assertion(&BodyAssertion::NotEmpty, &json_response(200, r#"[{"a":1}]"#));
        assert!(result.passed);

        let result = checker.check_assertion(&BodyAssertion::NotEmpty, &json_response(200, "[]"));
        assert!(!result.passed);
    }

    #[test]
    fn test_empty_array() {
        let checker = ContractChecker::new();

        let result =
            checker.check_assertion(&BodyAssertion::EmptyArray, &json_response(200, "[]"));
        assert!(result.passed);

        let result =
            checker.check_assertion(&BodyAssertion::EmptyArray, &json_response(200, r#"[1]"#));
        assert!(!result.passed);

        let result =
            checker.check_assertion(&BodyAssertion::EmptyArray, &json_response(200, r#"{}"#));
        assert!(!result.passed);
    }

    #[test]
    fn test_length_at_most() {
        let checker = ContractChecker::new();
        let assertion = BodyAssertion::Length {
            operator: ComparisonOperator::LessThanOrEqual,
            value: 2,
        };

        let result = checker.check_assertion(&assertion, &json_response(200, "[1, 2]"));
        assert!(result.passed);

        let result = checker.check_assertion(&assertion, &json_response(200, "[1, 2, 3]"));
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("3"));
    }

    #[test]
    fn test_field_equals_at_index() {
        let checker = ContractChecker::new();
        let body = r#"[{"name": "StaffUngradedAssignment"}, {"name": "fastlane"}]"#;
        let response = json_response(200, body);

        let assertion = BodyAssertion::FieldEquals {
            path: "$[0].name".to_string(),
            expected: serde_json::json!("StaffUngradedAssignment"),
        };
        assert!(checker.check_assertion(&assertion, &response).passed);

        let assertion = BodyAssertion::FieldEquals {
            path: "$[0].name".to_string(),
            expected: serde_json::json!("fastlane"),
        };
        let result = checker.check_assertion(&assertion, &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("\"StaffUngradedAssignment\""));
    }

    #[test]
    fn test_field_equals_missing_path() {
        let checker = ContractChecker::new();
        let assertion = BodyAssertion::FieldEquals {
            path: "$.commit_id".to_string(),
            expected: serde_json::json!("8147d5"),
        };
        let result = checker.check_assertion(&assertion, &json_response(201, "{}"));
        assert!(!result.passed);
        assert!(result.error.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn test_field_matches() {
        let checker = ContractChecker::new();
        let response = json_response(201, r#"{"commit_id": "8147d505b846"}"#);

        let assertion = BodyAssertion::FieldMatches {
            path: "$.commit_id".to_string(),
            pattern: "^[0-9a-f]+$".to_string(),
        };
        assert!(checker.check_assertion(&assertion, &response).passed);

        let assertion = BodyAssertion::FieldMatches {
            path: "$.commit_id".to_string(),
            pattern: "^[A-Z]+$".to_string(),
        };
        assert!(!checker.check_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_contains_and_content_type() {
        let checker = ContractChecker::new();
        let response = json_response(200, r#"{"message": "Not Found"}"#);

        let assertion = BodyAssertion::Contains {
            text: "Not Found".to_string(),
        };
        assert!(checker.check_assertion(&assertion, &response).passed);

        let assertion = BodyAssertion::ContentType {
            expected: "application/json".to_string(),
        };
        assert!(checker.check_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_check_runs_status_first() {
        let checker = ContractChecker::new();
        let expectation = Expectation::status(200).with(BodyAssertion::NotEmpty);
        let results = checker.check(&expectation, &json_response(200, r#"[{"a":1}]"#));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description, "status = 200");
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn test_check_is_deterministic() {
        // Re-running the same case against unchanged remote state yields the
        // same outcome: the checker is a pure function of the snapshot.
        let checker = ContractChecker::new();
        let expectation = Expectation::status(200)
            .with(BodyAssertion::Length {
                operator: ComparisonOperator::LessThanOrEqual,
                value: 2,
            })
            .with(BodyAssertion::FieldEquals {
                path: "$[0].name".to_string(),
                expected: serde_json::json!("fastlane"),
            });
        let response = json_response(200, r#"[{"name": "fastlane"}]"#);

        let first = checker.check(&expectation, &response);
        let second = checker.check(&expectation, &response);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_body_response_not_parsed_as_success() {
        // A 400 from a malformed-body case passes on status alone; the
        // checker never tries to interpret the body as a success payload.
        let checker = ContractChecker::new();
        let expectation = Expectation::status(400);
        let results = checker.check(&expectation, &json_response(400, r#"{"message": "Problems parsing JSON"}"#));
        assert!(results.iter().all(|r| r.passed));
    }
}
