//! Report sinks.

mod allure;

pub use allure::AllureResultsSink;
