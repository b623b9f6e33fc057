//! Covenant Infrastructure - Adapters and engines
//!
//! Concrete implementations of the application-layer ports, the contract
//! checker, the suite runner, and the file loaders.

pub mod adapters;
pub mod checker;
pub mod harness;
pub mod persistence;

pub use adapters::ReqwestHttpClient;
pub use checker::ContractChecker;
pub use harness::{RunOptions, SuiteRunner};
pub use persistence::{LoadError, load_config, load_suite};
