//! Console rendering of run reports

use std::fmt::Write;

use covenant_domain::report::{CaseOutcome, RunReport};

/// Renders the run report as the console summary: one line per case, the
/// expected vs. observed detail for failures, and an aggregate footer.
#[must_use]
pub fn render(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "suite {}: {} cases",
        report.suite_name,
        report.total()
    );

    for case in &report.reports {
        match &case.outcome {
            CaseOutcome::Passed => {
                let _ = writeln!(out, "  PASS  {} ({} ms)", case.case_name, case.duration_ms);
            }
            CaseOutcome::ContractViolation => {
                let _ = writeln!(out, "  FAIL  {} ({} ms)", case.case_name, case.duration_ms);
                for failure in case.failures() {
                    let _ = write!(out, "        {}", failure.description);
                    if let Some(error) = &failure.error {
                        let _ = write!(out, ": {error}");
                    }
                    let _ = writeln!(out);
                }
            }
            CaseOutcome::TransportError { message } => {
                let _ = writeln!(
                    out,
                    "  ERROR {} ({} ms): transport: {message}",
                    case.case_name, case.duration_ms
                );
            }
        }
    }

    let _ = writeln!(
        out,
        "{} passed, {} contract failures, {} transport errors ({} ms)",
        report.passed, report.contract_failures, report.transport_failures, report.duration_ms
    );
    out
}
