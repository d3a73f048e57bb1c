//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use std::time::Instant;

use objects_contract_application::ports::AssertionEvaluator;
use objects_contract_domain::response::ResponseSpec;
use objects_contract_domain::testing::{Assertion, AssertionResult, TestResults, TestSuite};
use regex::Regex;
use serde_json::Value;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a test suite against a response. Stops after the first failure
    /// when `suite.stop_on_failure` is set.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let start = Instant::now();
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = Self::run_assertion(assertion, response);
            let failed = !result.passed;
            results.push(result);

            if failed && suite.stop_on_failure {
                break;
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        TestResults::new(&suite.name, results, duration_ms)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonPathMatches { path, pattern } => {
                Self::check_json_path_matches(assertion, response, path, pattern)
            }
            Assertion::JsonPathAbsent { path } => {
                Self::check_json_path_absent(assertion, response, path)
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status = {expected}, got {actual}"),
            )
        }
    }

    /// Parses the body and resolves `path`, or returns the failed result.
    fn resolve(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> Result<Option<Value>, AssertionResult> {
        let json = serde_json::from_str::<Value>(&response.body).map_err(|e| {
            AssertionResult::fail_with_value(
                assertion.clone(),
                body_preview(&response.body),
                format!("Failed to parse body as JSON: {e}"),
            )
        })?;

        query_json_path(&json, path).map_err(|e| {
            AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}"))
        })
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&Value>,
    ) -> AssertionResult {
        let value = match Self::resolve(assertion, response, path) {
            Ok(Some(value)) => value,
            Ok(None) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("JSON path '{path}' not found"),
                );
            }
            Err(failed) => return failed,
        };

        match expected {
            Some(expected_value) if &value == expected_value => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Some(expected_value) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' value mismatch: expected {expected_value}, got {value}"
                ),
            ),
            None if value.is_null() => AssertionResult::fail_with_value(
                assertion.clone(),
                "null",
                format!("JSON path '{path}' is null"),
            ),
            None => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
        }
    }

    fn check_json_path_matches(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        pattern: &str,
    ) -> AssertionResult {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Invalid pattern '{pattern}': {e}"),
                );
            }
        };

        match Self::resolve(assertion, response, path) {
            Ok(Some(Value::String(actual))) if regex.is_match(&actual) => {
                AssertionResult::pass_with_value(assertion.clone(), actual)
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' does not match '{pattern}': {value}"),
            ),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(failed) => failed,
        }
    }

    fn check_json_path_absent(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        match Self::resolve(assertion, response, path) {
            Ok(None) => AssertionResult::pass(assertion.clone()),
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' should be absent"),
            ),
            Err(failed) => failed,
        }
    }
}

impl AssertionEvaluator for TestRunner {
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        self.run(suite, response)
    }
}

/// First 100 characters of a body, for failure output.
fn body_preview(body: &str) -> String {
    if body.chars().count() > 100 {
        format!("{}...", body.chars().take(100).collect::<String>())
    } else {
        body.to_string()
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0], $.array[*]
fn query_json_path(json: &Value, path: &str) -> Result<Option<Value>, String> {
    let Some(path) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    if path.is_empty() {
        return Ok(Some(json.clone()));
    }

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in split_path_segments(path) {
        if let Some((name, index)) = parse_array_access(&segment) {
            if !name.is_empty() {
                match current.get(name) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            if index == "*" {
                return Ok(Some(current.clone()));
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment.as_str()) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment[bracket_start + 1..].strip_suffix(']')?;
    Some((&segment[..bracket_start], inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;

    fn create_response(
        status: u16,
        body: &str,
        headers: HashMap<String, String>,
    ) -> ResponseSpec {
        ResponseSpec::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    fn json_response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        create_response(status, body, headers)
    }

    const CREATED: &str = r#"{
        "id": "ff8081819782e69e0197a1b2c3d40123",
        "name": "Francieli Desafio",
        "createdAt": "2025-06-16T14:03:21.406+00:00",
        "data": {
            "year": 2024,
            "office": "Quality Assurance",
            "company": "NtConsult",
            "notes": null
        },
        "tags": ["a", "b"]
    }"#;

    #[test]
    fn test_status_code_exact() {
        let response = create_response(200, "", HashMap::new());

        let result = TestRunner::run_assertion(&Assertion::status(200), &response);
        assert!(result.passed);

        let result = TestRunner::run_assertion(&Assertion::status(201), &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("200"));
        assert_eq!(result.error.as_deref(), Some("Expected status = 201, got 200"));
    }

    #[test]
    fn test_json_path_equals() {
        let response = json_response(200, CREATED);

        for assertion in [
            Assertion::json_eq("$.name", "Francieli Desafio"),
            Assertion::json_eq("$.data.year", 2024),
            Assertion::json_eq("$.tags[1]", "b"),
        ] {
            assert!(TestRunner::run_assertion(&assertion, &response).passed);
        }

        let assertion = Assertion::json_eq("$.data.year", 2025);
        let result = TestRunner::run_assertion(&assertion, &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("2024"));
    }

    #[test]
    fn test_json_path_type_sensitive() {
        let response = json_response(200, CREATED);
        let assertion = Assertion::json_eq("$.data.year", "2024");
        let result = TestRunner::run_assertion(&assertion, &response);
        assert!(!result.passed);
    }

    #[test]
    fn test_json_path_not_null() {
        let response = json_response(200, CREATED);

        assert!(TestRunner::run_assertion(&Assertion::json_not_null("$.id"), &response).passed);

        let assertion = Assertion::json_not_null("$.data.notes");
        let null = TestRunner::run_assertion(&assertion, &response);
        assert!(!null.passed);
        assert_eq!(null.actual.as_deref(), Some("null"));

        let assertion = Assertion::json_not_null("$.updatedAt");
        let missing = TestRunner::run_assertion(&assertion, &response);
        assert!(!missing.passed);
        assert_eq!(missing.error.as_deref(), Some("JSON path '$.updatedAt' not found"));
    }

    #[test]
    fn test_json_path_absent() {
        let response = json_response(200, r#"{"name":"x","data":{"year":2024}}"#);

        let office = Assertion::json_absent("$.data.office");
        assert!(TestRunner::run_assertion(&office, &response).passed);

        let year = Assertion::json_absent("$.data.year");
        let present = TestRunner::run_assertion(&year, &response);
        assert!(!present.passed);
        assert_eq!(present.actual.as_deref(), Some("2024"));
    }

    #[test]
    fn test_json_path_matches_regex() {
        let path_safe = Assertion::json_matches("$.id", "^[A-Za-z0-9_-]+$");

        let response = json_response(200, CREATED);
        assert!(TestRunner::run_assertion(&path_safe, &response).passed);

        let response = json_response(200, r#"{"id":"a/b"}"#);
        let result = TestRunner::run_assertion(&path_safe, &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("\"a/b\""));

        let response = json_response(200, r#"{"id":42}"#);
        assert!(!TestRunner::run_assertion(&path_safe, &response).passed);
    }

    #[test]
    fn test_invalid_pattern_fails_the_assertion() {
        let response = json_response(200, CREATED);
        let result = TestRunner::run_assertion(&Assertion::json_matches("$.id", "(["), &response);
        assert!(!result.passed);
        assert!(
            result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("Invalid pattern")),
            "{result:?}"
        );
    }

    #[test]
    fn test_json_path_on_non_json_body() {
        let response = create_response(502, "<html>Bad Gateway</html>", HashMap::new());
        let result = TestRunner::run_assertion(&Assertion::json_not_null("$.id"), &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_run_suite() {
        let response = json_response(200, CREATED);

        let suite = TestSuite::new("create object").with_assertions([
            Assertion::status(200),
            Assertion::json_not_null("$.id"),
            Assertion::json_eq("$.data.company", "NtConsult"),
        ]);

        let results = TestRunner::new().run(&suite, &response);
        assert_eq!(results.total, 3);
        assert_eq!(results.passed, 3);
        assert!(results.all_passed());
    }

    #[test]
    fn test_stop_on_failure() {
        let response = json_response(404, r#"{"error":"missing"}"#);

        let suite = TestSuite::new("get object")
            .with_assertions([Assertion::status(200), Assertion::json_not_null("$.error")]);

        let all = TestRunner::new().run(&suite, &response);
        assert_eq!(all.total, 2);

        let stopped = TestRunner::new().evaluate(&suite.with_stop_on_failure(true), &response);
        assert_eq!(stopped.total, 1);
        assert_eq!(stopped.failed, 1);
    }

    #[test]
    fn test_query_json_path() {
        let json: Value = serde_json::from_str(r#"{"a":{"b":[10,20]}}"#).expect("valid json");
        assert_eq!(query_json_path(&json, "$.a.b[1]"), Ok(Some(Value::from(20))));
        assert_eq!(query_json_path(&json, "$.a.c"), Ok(None));
        assert_eq!(query_json_path(&json, "$"), Ok(Some(json.clone())));
        assert!(query_json_path(&json, "a.b").is_err());
        assert!(query_json_path(&json, "$.a.b[x]").is_err());
    }
}
