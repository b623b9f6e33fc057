//! Run outcomes and reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::expectation::AssertionResult;

/// Terminal state of a single test case.
///
/// A contract violation and a transport failure are distinct outcomes: a
/// test author needs to tell "the API's contract changed" apart from "the
/// API was unreachable".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Status and every body assertion held.
    Passed,
    /// The exchange completed but the response did not match the declared
    /// expectation.
    ContractViolation,
    /// The HTTP exchange could not be completed at all.
    TransportError {
        /// What went wrong (timeout, DNS, connection refused, ...).
        message: String,
    },
}

impl CaseOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Report for one executed test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseReport {
    /// The case name.
    pub case_name: String,
    /// Terminal state.
    pub outcome: CaseOutcome,
    /// Every assertion evaluated, passed and failed alike. Empty when the
    /// exchange never completed.
    pub results: Vec<AssertionResult>,
    /// Wall-clock time spent on the case, in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Builds a report from evaluated assertion results.
    #[must_use]
    pub fn from_results(
        case_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let outcome = if results.iter().all(|r| r.passed) {
            CaseOutcome::Passed
        } else {
            CaseOutcome::ContractViolation
        };
        Self {
            case_name: case_name.into(),
            outcome,
            results,
            duration_ms,
        }
    }

    /// Builds a report for a case whose exchange never completed.
    #[must_use]
    pub fn transport_error(
        case_name: impl Into<String>,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            case_name: case_name.into(),
            outcome: CaseOutcome::TransportError {
                message: message.into(),
            },
            results: Vec::new(),
            duration_ms,
        }
    }

    /// Returns the failed assertion results.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Aggregate report for a whole suite run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Suite that was run.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case reports, in declaration order.
    pub reports: Vec<CaseReport>,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of contract violations.
    pub contract_failures: usize,
    /// Number of transport failures.
    pub transport_failures: usize,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Builds an aggregate report from per-case reports.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        reports: Vec<CaseReport>,
        duration_ms: u64,
    ) -> Self {
        let passed = reports.iter().filter(|r| r.outcome.is_passed()).count();
        let contract_failures = reports
            .iter()
            .filter(|r| r.outcome == CaseOutcome::ContractViolation)
            .count();
        let transport_failures = reports.len() - passed - contract_failures;

        Self {
            suite_name: suite_name.into(),
            started_at,
            reports,
            passed,
            contract_failures,
            transport_failures,
            duration_ms,
        }
    }

    /// Returns the total number of cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.contract_failures == 0 && self.transport_failures == 0
    }
}
