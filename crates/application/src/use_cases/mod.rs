//! Use cases

mod issue_request;

pub use issue_request::IssueRequest;
