//! Placeholder resolution
//!
//! Turns declarative templates (`/repos/{owner}/{repo}/commits/{commit_sha}`)
//! into concrete requests by substituting fixture values from the harness
//! configuration. Resolution runs for the whole suite before any request is
//! sent, so a missing fixture aborts the run up front.

pub mod parser;
mod resolver;

pub use parser::{PlaceholderRef, parse_placeholders};
pub use resolver::{ResolvedCase, SuiteResolver};
