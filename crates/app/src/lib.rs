//! Wiring for the `objects-contract` binary.
//!
//! Kept in a library so integration tests build the exact suite the
//! binary runs, pointed at a local server.

use std::fmt::Write as _;
use std::sync::Arc;

use objects_contract_application::{
    ApplicationError, ContractSuite, HttpClientError, ScenarioOutcome, SuiteReport,
};
use objects_contract_infrastructure::{
    AllureResultsSink, ConfigError, ReqwestHttpClient, SuiteConfig, SystemClock, TestRunner,
};
use thiserror::Error;
use tracing::info;

/// Errors that stop the suite before any scenario runs.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("cannot create HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// The suite rejected its inputs.
    #[error(transparent)]
    Suite(#[from] ApplicationError),
}

/// Builds the suite from `config` with the production adapters.
///
/// # Errors
///
/// Returns an error if the client cannot be created or the base URL is
/// unusable.
pub fn build_suite(config: &SuiteConfig) -> Result<ContractSuite<ReqwestHttpClient>, SetupError> {
    let client = Arc::new(ReqwestHttpClient::new()?);
    let suite = ContractSuite::new(
        client,
        config.base_url(),
        Arc::new(TestRunner::new()),
        Arc::new(SystemClock::new()),
    )?;

    Ok(match config.results_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "writing allure results");
            suite.with_sink(Arc::new(AllureResultsSink::new(dir)))
        }
        None => suite,
    })
}

/// One line per scenario plus a totals line.
#[must_use]
pub fn render_summary(report: &SuiteReport) -> String {
    let mut out = String::new();
    for scenario in &report.scenarios {
        let tag = match scenario.outcome {
            ScenarioOutcome::Passed => "PASS",
            ScenarioOutcome::Failed { .. } => "FAIL",
            ScenarioOutcome::Broken { .. } => "BROKEN",
        };
        let _ = writeln!(
            out,
            "[{tag}] {:02} {}: {}",
            scenario.order, scenario.name, scenario.display_name
        );
        if let Some(reason) = scenario.outcome.reason() {
            let _ = writeln!(out, "       {reason}");
        }
    }
    let _ = writeln!(
        out,
        "{} scenarios: {} passed, {} failed ({} ms)",
        report.scenarios.len(),
        report.passed(),
        report.failed(),
        report.duration_ms
    );
    out
}
