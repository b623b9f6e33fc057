//! Suite resolution engine

use std::collections::HashMap;

use url::Url;

use covenant_domain::case::{Suite, TestCase};
use covenant_domain::expectation::{BodyAssertion, Expectation};
use covenant_domain::request::{Headers, ResolvedRequest};

use super::parser::parse_placeholders;
use crate::config::{ConfigError, HarnessConfig};

/// A test case with all placeholders substituted, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCase {
    /// The case name, carried through to the report.
    pub name: String,
    /// The contract, with string-valued operands resolved.
    pub expect: Expectation,
    /// The concrete request.
    pub request: ResolvedRequest,
}

/// Resolves a whole suite against one environment's configuration.
///
/// Construction fails fast on a missing credential or an unparseable base
/// URL; [`SuiteResolver::resolve_suite`] fails fast on the first unknown
/// placeholder. Either way, nothing is sent until every case resolves.
#[derive(Debug, Clone)]
pub struct SuiteResolver {
    base_url: Url,
    default_headers: Headers,
    timeout_ms: u64,
    fixtures: HashMap<String, String>,
}

impl SuiteResolver {
    /// Builds a resolver from the harness configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credential is missing or the
    /// base URL does not parse.
    pub fn new(config: &HarnessConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config.parsed_base_url()?,
            default_headers: config.default_headers()?,
            timeout_ms: config.timeout_ms,
            fixtures: config.fixtures.clone(),
        })
    }

    /// Resolves every case in the suite, preserving declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error encountered; the caller must
    /// treat this as fatal for the whole run.
    pub fn resolve_suite(&self, suite: &Suite) -> Result<Vec<ResolvedCase>, ConfigError> {
        suite.cases.iter().map(|c| self.resolve_case(c)).collect()
    }

    /// Resolves a single case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPlaceholder`] for a template referencing
    /// a fixture that is not configured, or
    /// [`ConfigError::InvalidResolvedUrl`] if the substituted path does not
    /// form a URL against the base.
    pub fn resolve_case(&self, case: &TestCase) -> Result<ResolvedCase, ConfigError> {
        let path = self.substitute(&case.name, &case.request.path)?;
        let mut url =
            self.base_url
                .join(&path)
                .map_err(|e| ConfigError::InvalidResolvedUrl {
                    case: case.name.clone(),
                    message: e.to_string(),
                })?;

        let query: Vec<(String, String)> = case
            .request
            .query
            .iter()
            .map(|p| Ok((p.key.clone(), self.substitute(&case.name, &p.value)?)))
            .collect::<Result<_, ConfigError>>()?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        Ok(ResolvedCase {
            name: case.name.clone(),
            expect: self.resolve_expectation(&case.name, &case.expect)?,
            request: ResolvedRequest {
                method: case.request.method,
                url,
                headers: self.default_headers.merged_with(&case.request.headers),
                body: case.request.body.clone(),
                timeout_ms: self.timeout_ms,
            },
        })
    }

    /// Substitutes fixtures into string-valued expectation operands, so that
    /// expected values (a repo name, a commit hash) can be parameterized per
    /// environment like the request side.
    fn resolve_expectation(
        &self,
        case: &str,
        expect: &Expectation,
    ) -> Result<Expectation, ConfigError> {
        let mut resolved = expect.clone();
        for assertion in &mut resolved.body {
            match assertion {
                BodyAssertion::FieldEquals { expected, .. } => {
                    if let serde_json::Value::String(s) = expected {
                        *s = self.substitute(case, s)?;
                    }
                }
                BodyAssertion::Contains { text } => {
                    *text = self.substitute(case, text)?;
                }
                _ => {}
            }
        }
        Ok(resolved)
    }

    fn substitute(&self, case: &str, input: &str) -> Result<String, ConfigError> {
        let references = parse_placeholders(input);
        if references.is_empty() {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;
        for reference in &references {
            result.push_str(&input[last_end..reference.span.start]);
            let value =
                self.fixtures
                    .get(&reference.name)
                    .ok_or_else(|| ConfigError::UnknownPlaceholder {
                        case: case.to_string(),
                        name: reference.name.clone(),
                    })?;
            result.push_str(value);
            last_end = reference.span.end;
        }
        result.push_str(&input[last_end..]);
        Ok(result)
    }
}
