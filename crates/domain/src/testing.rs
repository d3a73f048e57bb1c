//! Response testing and assertions.
//!
//! This module provides types for defining and executing checks on HTTP responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A test assertion to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Exact status code expected.
        expected: u16,
    },
    /// Check JSON path is present and either equals a value or is not null.
    JsonPath {
        /// JSONPath expression (e.g., "$.data.year").
        path: String,
        /// Expected value (as JSON). `None` only requires a non-null value.
        expected: Option<serde_json::Value>,
    },
    /// Check the string at a JSON path matches a regex.
    JsonPathMatches {
        /// JSONPath expression.
        path: String,
        /// Regex the whole value is tested against.
        pattern: String,
    },
    /// Check JSON path is not present in the body.
    JsonPathAbsent {
        /// JSONPath expression.
        path: String,
    },
}

impl Assertion {
    /// Status code must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode { expected: code }
    }

    /// Value at `path` must equal `expected`.
    #[must_use]
    pub fn json_eq(path: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: Some(expected.into()),
        }
    }

    /// Value at `path` must be present and not null.
    #[must_use]
    pub fn json_not_null(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: None,
        }
    }

    /// String at `path` must match the regex `pattern`.
    #[must_use]
    pub fn json_matches(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::JsonPathMatches {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// Nothing may be present at `path`.
    #[must_use]
    pub fn json_absent(path: impl Into<String>) -> Self {
        Self::JsonPathAbsent { path: path.into() }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => {
                format!("JSON {path} equals {v}")
            }
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} is not null"),
            Self::JsonPathMatches { path, pattern } => {
                format!("JSON {path} matches \"{pattern}\"")
            }
            Self::JsonPathAbsent { path } => format!("JSON {path} is absent"),
        }
    }

    /// Returns the expected side of the assertion, for failure reports.
    #[must_use]
    pub fn expected_display(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("= {expected}"),
            Self::JsonPath {
                expected: Some(v), ..
            } => v.to_string(),
            Self::JsonPath { expected: None, .. } => "not null".to_string(),
            Self::JsonPathMatches { pattern, .. } => format!("matches \"{pattern}\""),
            Self::JsonPathAbsent { .. } => "absent".to_string(),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// A named group of assertions checked against one response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TestSuite {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Test suite name.
    pub name: String,
    /// Assertions to run.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop on first failure.
    #[serde(default)]
    pub stop_on_failure: bool,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Add several assertions (builder pattern).
    #[must_use]
    pub fn with_assertions(mut self, assertions: impl IntoIterator<Item = Assertion>) -> Self {
        self.assertions.extend(assertions);
        self
    }

    /// Set whether to stop on first failure (builder pattern).
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Returns the first failed assertion, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&AssertionResult> {
        self.results.iter().find(|r| !r.passed)
    }
}
