//! Ordered, sequential execution of the scenario catalog.

use std::sync::Arc;
use std::time::Instant;

use objects_contract_domain::JobApplicant;
use tracing::{info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::execute_request::ExecuteRequest;
use crate::objects_api::ObjectsEndpoint;
use crate::ports::{AssertionEvaluator, Clock, HttpClient, NullReportSink, ReportSink};
use crate::report::{ScenarioOutcome, ScenarioReport, SuiteReport};
use crate::scenarios::{self, Catalog, ScenarioContext, ScenarioKind};

/// Runs scenarios one after another in ascending order.
///
/// A failing scenario never stops the run; each scenario starts from a
/// fresh context and creates whatever it needs.
pub struct ContractSuite<C: HttpClient> {
    executor: ExecuteRequest<C>,
    endpoint: ObjectsEndpoint,
    evaluator: Arc<dyn AssertionEvaluator>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn ReportSink>,
    fixture: JobApplicant,
    catalog: Catalog,
}

impl<C: HttpClient> ContractSuite<C> {
    /// Creates a suite running the full catalog against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable URL.
    pub fn new(
        client: Arc<C>,
        base_url: &str,
        evaluator: Arc<dyn AssertionEvaluator>,
        clock: Arc<dyn Clock>,
    ) -> ApplicationResult<Self> {
        Ok(Self {
            executor: ExecuteRequest::new(client),
            endpoint: ObjectsEndpoint::new(base_url)?,
            evaluator,
            clock,
            sink: Arc::new(NullReportSink),
            fixture: JobApplicant::default_fixture(),
            catalog: Catalog::full(),
        })
    }

    /// Sets the report sink (builder pattern).
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Restricts the run to `catalog` (builder pattern).
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EmptySuite` if the catalog is empty.
    pub fn with_catalog(mut self, catalog: Catalog) -> ApplicationResult<Self> {
        if catalog.is_empty() {
            return Err(ApplicationError::EmptySuite);
        }
        self.catalog = catalog;
        Ok(self)
    }

    /// Runs every selected scenario and returns the summary.
    pub async fn run(&self) -> SuiteReport {
        let start = Instant::now();
        info!(
            base_url = %self.endpoint.base_url(),
            scenarios = self.catalog.len(),
            "starting contract suite"
        );

        let mut scenarios = Vec::with_capacity(self.catalog.len());
        for kind in self.catalog.iter() {
            let report = self.run_scenario(kind).await;
            if let Err(e) = self.sink.record(&report).await {
                warn!(scenario = kind.name(), error = %e, "failed to publish scenario report");
            }
            scenarios.push(report);
        }

        #[allow(clippy::cast_possible_truncation)]
        let report = SuiteReport {
            scenarios,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        if let Err(e) = self.sink.finish(&report).await {
            warn!(error = %e, "failed to publish suite report");
        }

        info!(
            passed = report.passed(),
            failed = report.failed(),
            duration_ms = report.duration_ms,
            "contract suite finished"
        );
        report
    }

    /// Runs a single scenario in a fresh context.
    pub async fn run_scenario(&self, kind: ScenarioKind) -> ScenarioReport {
        let started_at = self.clock.now();
        let mut ctx = ScenarioContext::new(
            &self.executor,
            &self.endpoint,
            self.evaluator.as_ref(),
            &self.fixture,
        );

        let result = scenarios::run(kind, &mut ctx).await;
        let (exchanges, checks) = ctx.into_parts();

        let outcome = match result {
            Ok(()) => {
                info!(scenario = %kind, "passed");
                ScenarioOutcome::Passed
            }
            Err(e) => {
                warn!(scenario = %kind, reason = %e, "failed");
                exchanges.emit_failure_detail(kind.name());
                let reason = e.to_string();
                if e.is_contract_violation() {
                    ScenarioOutcome::Failed { reason }
                } else {
                    ScenarioOutcome::Broken { reason }
                }
            }
        };

        ScenarioReport {
            order: kind.order(),
            name: kind.name().to_string(),
            display_name: kind.display_name().to_string(),
            outcome,
            checks,
            exchanges,
            started_at,
            finished_at: self.clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::io;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use objects_contract_domain::request::RequestSpec;
    use objects_contract_domain::response::ResponseSpec;
    use objects_contract_domain::{AssertionResult, TestResults, TestSuite};
    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::MakeWriter;

    use crate::ports::{HttpClientError, ReportError};

    /// Answers every request with the same response or error.
    struct FixedClient {
        response: Result<ResponseSpec, HttpClientError>,
    }

    impl HttpClient for FixedClient {
        fn execute(
            &self,
            _request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>
        {
            let result = self.response.clone();
            Box::pin(async move { result })
        }
    }

    /// Passes every assertion.
    struct AcceptAll;

    impl AssertionEvaluator for AcceptAll {
        fn evaluate(&self, suite: &TestSuite, _response: &ResponseSpec) -> TestResults {
            let results = suite
                .assertions
                .iter()
                .cloned()
                .map(AssertionResult::pass)
                .collect();
            TestResults::new(&suite.name, results, 0)
        }
    }

    /// Fails every assertion it is given.
    struct RejectAll;

    impl AssertionEvaluator for RejectAll {
        fn evaluate(&self, suite: &TestSuite, _response: &ResponseSpec) -> TestResults {
            let results = suite
                .assertions
                .iter()
                .cloned()
                .map(|assertion| AssertionResult::fail_with_value(assertion, "500", "rejected"))
                .collect();
            TestResults::new(&suite.name, results, 0)
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        names: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        async fn record(&self, report: &ScenarioReport) -> Result<(), ReportError> {
            if let Ok(mut names) = self.names.lock() {
                names.push(report.name.clone());
            }
            Ok(())
        }
    }

    /// Formatted log output shared with a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn suite_with(
        client: FixedClient,
        evaluator: Arc<dyn AssertionEvaluator>,
    ) -> ContractSuite<FixedClient> {
        ContractSuite::new(
            Arc::new(client),
            "https://api.restful-api.dev",
            evaluator,
            Arc::new(FixedClock),
        )
        .expect("valid base url")
    }

    fn suite(client: FixedClient) -> ContractSuite<FixedClient> {
        suite_with(client, Arc::new(AcceptAll))
    }

    fn ok_client() -> FixedClient {
        FixedClient {
            response: Ok(ResponseSpec::new(
                200u16,
                HashMap::new(),
                br#"{"id":"ff8081819782e69e","name":"x","data":{}}"#.to_vec(),
                Duration::from_millis(5),
            )),
        }
    }

    #[tokio::test]
    async fn test_runs_every_scenario_in_order() {
        let sink = Arc::new(RecordingSink::default());
        let suite = suite(ok_client()).with_sink(sink.clone());

        let report = suite.run().await;

        assert!(report.all_passed());
        let orders: Vec<u8> = report.scenarios.iter().map(|s| s.order).collect();
        assert_eq!(orders, (1..=14).collect::<Vec<u8>>());
        let recorded = sink.names.lock().expect("lock").clone();
        assert_eq!(
            recorded,
            ScenarioKind::ALL
                .iter()
                .map(|k| k.name().to_string())
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_precondition_adds_an_exchange() {
        let suite = suite(ok_client());

        let created = suite.run_scenario(ScenarioKind::PostCreatesObject).await;
        let fetched = suite.run_scenario(ScenarioKind::GetReturnsCreatedObject).await;
        let deleted_twice = suite.run_scenario(ScenarioKind::DeleteIsSingleUse).await;

        assert_eq!(created.exchanges.len(), 1);
        assert_eq!(fetched.exchanges.len(), 2);
        assert_eq!(deleted_twice.exchanges.len(), 3);
    }

    #[tokio::test]
    async fn test_transport_error_marks_scenario_broken() {
        let suite = suite(FixedClient {
            response: Err(HttpClientError::ConnectionFailed("refused".to_string())),
        })
        .with_catalog(Catalog::core())
        .expect("non-empty catalog");

        let report = suite.run().await;

        assert_eq!(report.scenarios.len(), 10);
        assert_eq!(report.failed(), 10);
        let first = &report.scenarios[0];
        assert_eq!(first.outcome.label(), "broken");
        assert_eq!(
            first.outcome.reason(),
            Some("Create object: request failed: Connection failed: refused")
        );
        assert_eq!(first.exchanges.len(), 1);
    }

    #[tokio::test]
    async fn test_exchange_detail_is_logged_only_for_failed_scenarios() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let passed = suite(ok_client())
            .run_scenario(ScenarioKind::PostCreatesObject)
            .await;
        assert!(passed.outcome.is_passed());
        assert!(!logs.contents().contains("request/response of failed scenario"));

        let failed = suite_with(ok_client(), Arc::new(RejectAll))
            .run_scenario(ScenarioKind::PostCreatesObject)
            .await;
        assert_eq!(failed.outcome.label(), "failed");
        let output = logs.contents();
        assert!(output.contains("request/response of failed scenario"), "{output}");
        assert!(output.contains("POST https://api.restful-api.dev/objects"), "{output}");
        assert!(output.contains("Content-Type: application/json"), "{output}");
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let empty = Catalog::from_kinds([] as [ScenarioKind; 0]);
        let result = suite(ok_client()).with_catalog(empty);
        assert!(matches!(result, Err(ApplicationError::EmptySuite)));
    }
}
