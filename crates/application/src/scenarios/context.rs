//! Per-scenario execution context and the create-object precondition.

use objects_contract_domain::request::{RequestBody, RequestSpec};
use objects_contract_domain::response::ResponseSpec;
use objects_contract_domain::{
    Assertion, CreatedObjectHandle, DomainError, JobApplicant, ObjectPayload, TestResults,
    TestSuite,
};
use thiserror::Error;

use crate::capture::ExchangeLog;
use crate::execute_request::{ExecuteRequest, ExecuteRequestError};
use crate::objects_api::ObjectsEndpoint;
use crate::ports::{AssertionEvaluator, HttpClient};

const CREATE_STEP: &str = "create object precondition";

/// Why a scenario stopped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// A check on the response did not hold.
    #[error("{step}: {message} (expected {expected}, actual {actual})")]
    AssertionFailed {
        /// Step the check belongs to.
        step: String,
        /// Description of the failing assertion.
        assertion: String,
        /// Expected value.
        expected: String,
        /// Actual value.
        actual: String,
        /// Evaluator message.
        message: String,
    },

    /// The request could not be sent or no response arrived.
    #[error("{step}: request failed: {source}")]
    Request {
        /// Step the request belongs to.
        step: String,
        /// Underlying error.
        #[source]
        source: ExecuteRequestError,
    },

    /// A value the scenario depends on could not be read from a response.
    #[error("{step}: cannot read '{field}' from response: {reason}")]
    Extraction {
        /// Step the value belongs to.
        step: String,
        /// Field name.
        field: String,
        /// What was wrong.
        reason: String,
    },

    /// A value failed domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ScenarioError {
    /// Returns true when the API answered but broke the contract.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Request { .. })
    }
}

/// State owned by one scenario run. Dropped when the scenario ends.
pub struct ScenarioContext<'a, C: HttpClient> {
    executor: &'a ExecuteRequest<C>,
    endpoint: &'a ObjectsEndpoint,
    evaluator: &'a dyn AssertionEvaluator,
    fixture: &'a JobApplicant,
    log: ExchangeLog,
    checks: Vec<TestResults>,
}

impl<'a, C: HttpClient> ScenarioContext<'a, C> {
    /// Creates a fresh context.
    pub fn new(
        executor: &'a ExecuteRequest<C>,
        endpoint: &'a ObjectsEndpoint,
        evaluator: &'a dyn AssertionEvaluator,
        fixture: &'a JobApplicant,
    ) -> Self {
        Self {
            executor,
            endpoint,
            evaluator,
            fixture,
            log: ExchangeLog::new(),
            checks: Vec::new(),
        }
    }

    /// Request builders for the objects resource.
    #[must_use]
    pub const fn endpoint(&self) -> &ObjectsEndpoint {
        self.endpoint
    }

    /// The applicant fixture.
    #[must_use]
    pub const fn fixture(&self) -> &JobApplicant {
        self.fixture
    }

    /// Exchanges captured so far.
    #[must_use]
    pub const fn log(&self) -> &ExchangeLog {
        &self.log
    }

    /// Sends a request and records the exchange.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Request` if no response was received.
    pub async fn send(&mut self, request: RequestSpec) -> Result<ResponseSpec, ScenarioError> {
        match self.executor.execute(&request).await {
            Ok(response) => {
                self.log.record_response(request, response.clone());
                Ok(response)
            }
            Err(source) => {
                let step = request.name.clone();
                self.log.record_error(request, source.to_string());
                Err(ScenarioError::Request { step, source })
            }
        }
    }

    /// Checks `assertions` against `response`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::AssertionFailed` for the first assertion that
    /// does not hold.
    pub fn verify(
        &mut self,
        step: &str,
        response: &ResponseSpec,
        assertions: impl IntoIterator<Item = Assertion>,
    ) -> Result<(), ScenarioError> {
        let suite = TestSuite::new(step)
            .with_assertions(assertions)
            .with_stop_on_failure(true);
        let results = self.evaluator.evaluate(&suite, response);
        let failure = results.first_failure().map(|failed| ScenarioError::AssertionFailed {
            step: step.to_string(),
            assertion: failed.assertion.description(),
            expected: failed.assertion.expected_display(),
            actual: failed
                .actual
                .clone()
                .unwrap_or_else(|| "<missing>".to_string()),
            message: failed
                .error
                .clone()
                .unwrap_or_else(|| "assertion failed".to_string()),
        });
        self.checks.push(results);
        failure.map_or(Ok(()), Err)
    }

    /// Creates an object from the fixture and returns its id.
    ///
    /// Requires HTTP 200 and a non-null `id`; anything else aborts the
    /// calling scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, a check fails or the id is
    /// unusable.
    pub async fn create_object(&mut self) -> Result<CreatedObjectHandle, ScenarioError> {
        let payload = ObjectPayload::from(self.fixture);
        let request = self
            .endpoint
            .create(RequestBody::from_value(&payload.to_json()));
        let response = self.send(request).await?;
        self.verify(
            CREATE_STEP,
            &response,
            [Assertion::status(200), Assertion::json_not_null("$.id")],
        )?;
        let id = extract_string(CREATE_STEP, &response, "id")?;
        Ok(CreatedObjectHandle::new(id)?)
    }

    /// Consumes the context, returning what was captured.
    #[must_use]
    pub fn into_parts(self) -> (ExchangeLog, Vec<TestResults>) {
        (self.log, self.checks)
    }
}

/// Reads a top-level string field from a JSON response.
///
/// # Errors
///
/// Returns `ScenarioError::Extraction` if the body is not JSON or the field
/// is missing or not a string.
pub fn extract_string(
    step: &str,
    response: &ResponseSpec,
    field: &str,
) -> Result<String, ScenarioError> {
    extract_value(step, response, field)?
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| ScenarioError::Extraction {
            step: step.to_string(),
            field: field.to_string(),
            reason: "value is not a string".to_string(),
        })
}

/// Reads a top-level field from a JSON response.
///
/// # Errors
///
/// Returns `ScenarioError::Extraction` if the body is not JSON or the field
/// is missing.
pub fn extract_value(
    step: &str,
    response: &ResponseSpec,
    field: &str,
) -> Result<serde_json::Value, ScenarioError> {
    let extraction_error = |reason: &str| ScenarioError::Extraction {
        step: step.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    };
    let json = response
        .body_as_json()
        .ok_or_else(|| extraction_error("body is not JSON"))?;
    json.get(field)
        .cloned()
        .ok_or_else(|| extraction_error("field is missing"))
}
