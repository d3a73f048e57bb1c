//! Assertion evaluation port

use objects_contract_domain::{TestResults, TestSuite, response::ResponseSpec};

/// Port for checking a group of assertions against a response.
pub trait AssertionEvaluator: Send + Sync {
    /// Runs every assertion of `suite` against `response`, honouring
    /// `suite.stop_on_failure`.
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults;
}
