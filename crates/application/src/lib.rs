//! Covenant Application - Ports and use cases
//!
//! This crate holds everything between the domain model and the adapters:
//! the HTTP client port, harness configuration, placeholder resolution, and
//! the use case that issues a single request.

pub mod config;
pub mod placeholder;
pub mod ports;
pub mod use_cases;

pub use config::{ConfigError, HarnessConfig};
pub use placeholder::{ResolvedCase, SuiteResolver};
pub use ports::{HttpClient, HttpClientError};
pub use use_cases::IssueRequest;
