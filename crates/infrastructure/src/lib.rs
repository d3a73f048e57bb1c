//! Objects Contract Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and tracing
//! setup for the binary.

pub mod adapters;
pub mod config;
pub mod report;
pub mod serialization;
pub mod telemetry;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, RESULTS_DIR_VAR, SuiteConfig};
pub use report::AllureResultsSink;
pub use serialization::{SerializationError, to_json_stable, to_json_stable_bytes};
pub use telemetry::init_tracing;
pub use testing::TestRunner;
