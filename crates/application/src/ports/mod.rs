//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod assertion_evaluator;
mod clock;
mod http_client;
mod report_sink;

pub use assertion_evaluator::AssertionEvaluator;
pub use clock::Clock;
pub use http_client::{HttpClient, HttpClientError};
pub use report_sink::{NullReportSink, ReportError, ReportSink};
