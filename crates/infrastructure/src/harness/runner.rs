//! Suite runner
//!
//! Runs every resolved case to completion and aggregates the report. Cases
//! are independent: one case's failure never aborts its siblings, and
//! parallel mode needs no locking discipline because cases share no mutable
//! state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use covenant_application::placeholder::ResolvedCase;
use covenant_application::ports::HttpClient;
use covenant_application::use_cases::IssueRequest;
use covenant_domain::report::{CaseReport, RunReport};

use crate::checker::ContractChecker;

/// Execution options for a suite run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Run cases concurrently, one task per case.
    pub parallel: bool,
    /// Abort still-pending requests after this long; aborted cases report
    /// transport errors, never contract failures.
    pub run_timeout: Option<Duration>,
}

/// Runs a resolved suite against an HTTP client.
pub struct SuiteRunner<C: HttpClient> {
    issue: IssueRequest<C>,
    checker: ContractChecker,
    options: RunOptions,
}

impl<C: HttpClient + 'static> SuiteRunner<C> {
    /// Creates a runner with default options (sequential, no run timeout).
    pub fn new(client: Arc<C>) -> Self {
        Self {
            issue: IssueRequest::new(client),
            checker: ContractChecker::new(),
            options: RunOptions::default(),
        }
    }

    /// Replaces the execution options (builder pattern).
    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every case and returns the aggregate report, reports in
    /// declaration order.
    pub async fn run(&self, suite_name: &str, cases: Vec<ResolvedCase>) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();
        let deadline = self.options.run_timeout.map(|t| started + t);

        tracing::info!(suite = suite_name, cases = cases.len(), parallel = self.options.parallel, "starting run");

        let reports = if self.options.parallel {
            self.run_parallel(cases, deadline).await
        } else {
            self.run_sequential(cases, deadline).await
        };

        let report = RunReport::new(suite_name, started_at, reports, elapsed_ms(started));
        tracing::info!(
            suite = suite_name,
            passed = report.passed,
            contract_failures = report.contract_failures,
            transport_failures = report.transport_failures,
            "run finished"
        );
        report
    }

    async fn run_sequential(
        &self,
        cases: Vec<ResolvedCase>,
        deadline: Option<Instant>,
    ) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(run_case(self.issue.clone(), self.checker, case, deadline).await);
        }
        reports
    }

    async fn run_parallel(
        &self,
        cases: Vec<ResolvedCase>,
        deadline: Option<Instant>,
    ) -> Vec<CaseReport> {
        let names: Vec<String> = cases.iter().map(|c| c.name.clone()).collect();
        let mut set = JoinSet::new();
        for (index, case) in cases.into_iter().enumerate() {
            let issue = self.issue.clone();
            let checker = self.checker;
            set.spawn(async move { (index, run_case(issue, checker, case, deadline).await) });
        }

        let mut slots: Vec<Option<CaseReport>> = names.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(e) => tracing::error!(error = %e, "case task failed"),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    CaseReport::transport_error(names[index].clone(), "case task failed", 0)
                })
            })
            .collect()
    }
}

async fn run_case<C: HttpClient>(
    issue: IssueRequest<C>,
    checker: ContractChecker,
    case: ResolvedCase,
    deadline: Option<Instant>,
) -> CaseReport {
    let started = Instant::now();
    let result = match deadline {
        Some(deadline) => issue.issue_until(&case.request, deadline).await,
        None => issue.issue(&case.request).await,
    };
    let duration_ms = elapsed_ms(started);

    match result {
        Ok(snapshot) => {
            let results = checker.check(&case.expect, &snapshot);
            let report = CaseReport::from_results(case.name, results, duration_ms);
            if report.outcome.is_passed() {
                tracing::info!(case = %report.case_name, "passed");
            } else {
                tracing::warn!(case = %report.case_name, "contract violation");
            }
            report
        }
        Err(e) => {
            tracing::warn!(case = %case.name, error = %e, "transport error");
            CaseReport::transport_error(case.name, e.to_string(), duration_ms)
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
}
