//! Suite execution

mod runner;

pub use runner::{RunOptions, SuiteRunner};
