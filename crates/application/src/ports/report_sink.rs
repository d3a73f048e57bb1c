//! Report sink port
//!
//! External reporters receive every finished scenario. A sink failure is
//! logged by the suite and never changes a scenario's outcome.

use async_trait::async_trait;
use thiserror::Error;

use crate::report::{ScenarioReport, SuiteReport};

/// Errors raised while publishing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report failed.
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("report serialization error: {0}")]
    Serialization(String),
}

/// Port for publishing scenario results to an external reporter.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Publishes one finished scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter cannot store the result.
    async fn record(&self, report: &ScenarioReport) -> Result<(), ReportError>;

    /// Called once after the last scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter cannot store the summary.
    async fn finish(&self, _report: &SuiteReport) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Sink used when no reporter is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReportSink;

#[async_trait]
impl ReportSink for NullReportSink {
    async fn record(&self, _report: &ScenarioReport) -> Result<(), ReportError> {
        Ok(())
    }
}
