//! End-to-end harness test against a mock HTTP client.
//!
//! Exercises the whole pipeline below the CLI: configuration, placeholder
//! resolution, execution, contract checking, and aggregation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use covenant_application::config::HarnessConfig;
use covenant_application::placeholder::SuiteResolver;
use covenant_application::ports::{HttpClient, HttpClientError};
use covenant_domain::case::{Suite, TestCase};
use covenant_domain::expectation::{BodyAssertion, ComparisonOperator, Expectation};
use covenant_domain::report::CaseOutcome;
use covenant_domain::request::{RequestBody, RequestTemplate, ResolvedRequest};
use covenant_domain::response::ResponseSnapshot;
use covenant_infrastructure::{RunOptions, SuiteRunner};

/// Serves canned GitHub-shaped responses keyed on path and query.
struct FakeGithub;

#[async_trait]
impl HttpClient for FakeGithub {
    async fn execute(
        &self,
        request: &ResolvedRequest,
    ) -> Result<ResponseSnapshot, HttpClientError> {
        // Every request must carry the fixed header set.
        assert_eq!(
            request.headers.get("Accept"),
            Some("application/vnd.github.v3+json")
        );
        assert_eq!(request.headers.get("Authorization"), Some("Bearer t0ken"));

        let path = request.url.path().to_string();
        let query = request.url.query().unwrap_or("").to_string();

        let (status, body) = match (path.as_str(), query.as_str()) {
            ("/users/octocat/repos", "") => (
                200,
                r#"[{"name": "StaffUngradedAssignment"}, {"name": "fastlane"}]"#.to_string(),
            ),
            ("/users/octocat/repos", "type=member") => (200, "[]".to_string()),
            ("/users/octocat/repos", "per_page=1&page=2") => {
                (200, r#"[{"name": "fastlane"}]"#.to_string())
            }
            ("/users/no-such-user/repos", _) => (404, r#"{"message": "Not Found"}"#.to_string()),
            ("/repos/octocat/hello-world/commits/8147d505/comments", "") => {
                match &request.body {
                    RequestBody::Json {
                        value: serde_json::Value::Object(map),
                    } => (
                        201,
                        format!(
                            r#"{{"commit_id": "8147d505", "body": {}}}"#,
                            map.get("body").cloned().unwrap_or_default()
                        ),
                    ),
                    // Anything but an object trips the fake's input validation.
                    _ => (400, r#"{"message": "Problems parsing JSON"}"#.to_string()),
                }
            }
            _ => {
                return Err(HttpClientError::ConnectionRefused {
                    host: "api.github.test".to_string(),
                    port: 443,
                });
            }
        };

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(ResponseSnapshot::new(
            status,
            headers,
            body.into_bytes(),
            Duration::from_millis(2),
        ))
    }
}

fn config() -> HarnessConfig {
    let mut config = HarnessConfig::new("https://api.github.test");
    config.token = Some("t0ken".to_string());
    for (key, value) in [
        ("username", "octocat"),
        ("unknown_username", "no-such-user"),
        ("owner", "octocat"),
        ("repo", "hello-world"),
        ("commit_sha", "8147d505"),
        ("second_repo_name", "fastlane"),
    ] {
        config.fixtures.insert(key.to_string(), value.to_string());
    }
    config
}

fn suite() -> Suite {
    Suite::new("github-rest")
        .with_case(TestCase::new(
            "list repos for a valid user",
            RequestTemplate::get("/users/{username}/repos"),
            Expectation::status(200).with(BodyAssertion::NotEmpty),
        ))
        .with_case(TestCase::new(
            "member-only filter returns nothing for an owner",
            RequestTemplate::get("/users/{username}/repos").with_query("type", "member"),
            Expectation::status(200).with(BodyAssertion::EmptyArray),
        ))
        .with_case(TestCase::new(
            "second page with one repo per page",
            RequestTemplate::get("/users/{username}/repos")
                .with_query("per_page", "1")
                .with_query("page", "2"),
            Expectation::status(200)
                .with(BodyAssertion::Length {
                    operator: ComparisonOperator::LessThanOrEqual,
                    value: 1,
                })
                .with(BodyAssertion::FieldEquals {
                    path: "$[0].name".to_string(),
                    expected: serde_json::json!("{second_repo_name}"),
                }),
        ))
        .with_case(TestCase::new(
            "unknown user returns 404",
            RequestTemplate::get("/users/{unknown_username}/repos"),
            Expectation::status(404),
        ))
        .with_case(TestCase::new(
            "create a commit comment",
            RequestTemplate::post(
                "/repos/{owner}/{repo}/commits/{commit_sha}/comments",
                RequestBody::json_value(serde_json::json!({"body": "This is a new comment"})),
            ),
            Expectation::status(201)
                .with(BodyAssertion::FieldEquals {
                    path: "$.commit_id".to_string(),
                    expected: serde_json::json!("{commit_sha}"),
                })
                .with(BodyAssertion::FieldEquals {
                    path: "$.body".to_string(),
                    expected: serde_json::json!("This is a new comment"),
                }),
        ))
        .with_case(TestCase::new(
            "malformed body is rejected",
            RequestTemplate::post(
                "/repos/{owner}/{repo}/commits/{commit_sha}/comments",
                RequestBody::json_value(serde_json::json!("malformed")),
            ),
            Expectation::status(400),
        ))
}

#[tokio::test]
async fn full_suite_passes_against_conforming_service() {
    let resolver = SuiteResolver::new(&config()).expect("config is valid");
    let suite = suite();
    let cases = resolver.resolve_suite(&suite).expect("suite resolves");

    let runner = SuiteRunner::new(Arc::new(FakeGithub));
    let report = runner.run(&suite.name, cases).await;

    assert_eq!(report.total(), 6);
    assert_eq!(report.passed, 6);
    assert!(report.all_passed());
}

#[tokio::test]
async fn contract_change_is_reported_not_fatal() {
    // The service now answers the repo listing differently; only that case
    // fails, siblings are untouched.
    let mut suite = suite();
    suite.cases[0].expect = Expectation::status(200).with(BodyAssertion::FieldEquals {
        path: "$[0].name".to_string(),
        expected: serde_json::json!("renamed-repo"),
    });

    let resolver = SuiteResolver::new(&config()).expect("config is valid");
    let cases = resolver.resolve_suite(&suite).expect("suite resolves");

    let runner = SuiteRunner::new(Arc::new(FakeGithub)).with_options(RunOptions {
        parallel: true,
        run_timeout: None,
    });
    let report = runner.run(&suite.name, cases).await;

    assert_eq!(report.contract_failures, 1);
    assert_eq!(report.passed, 5);
    assert_eq!(report.reports[0].outcome, CaseOutcome::ContractViolation);

    let failure = report.reports[0]
        .failures()
        .next()
        .expect("one failing assertion");
    assert!(
        failure
            .error
            .as_deref()
            .expect("failure carries detail")
            .contains("renamed-repo")
    );
}

#[tokio::test]
async fn unresolvable_suite_aborts_before_any_request() {
    let mut bad_config = config();
    bad_config.fixtures.remove("commit_sha");

    let resolver = SuiteResolver::new(&bad_config).expect("config is valid");
    let result = resolver.resolve_suite(&suite());
    assert!(result.is_err());
}
