//! Objects Contract Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Request execution and the objects endpoint builders
//! - The scenario catalog and the ordered suite runner

pub mod capture;
pub mod error;
pub mod execute_request;
pub mod objects_api;
pub mod ports;
pub mod report;
pub mod scenarios;
pub mod suite;

pub use capture::{Exchange, ExchangeLog};
pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use objects_api::ObjectsEndpoint;
pub use ports::{
    AssertionEvaluator, Clock, HttpClient, HttpClientError, NullReportSink, ReportError,
    ReportSink,
};
pub use report::{ScenarioOutcome, ScenarioReport, SuiteReport};
pub use scenarios::{Catalog, ScenarioContext, ScenarioError, ScenarioKind};
pub use suite::ContractSuite;
