//! Contract checking
//!
//! One shared verifier evaluates declarative expectations against observed
//! responses; no test case carries inline validation logic.

mod json_query;
mod verifier;

pub use json_query::query_path;
pub use verifier::ContractChecker;
