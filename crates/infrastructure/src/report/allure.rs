//! Allure-compatible result writer.
//!
//! Each scenario becomes one `{uuid}-result.json` file. Every captured
//! exchange is written next to it as `{uuid}-attachment.json` and linked
//! from the result, so the Allure UI shows request and response per
//! scenario.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use objects_contract_application::capture::Exchange;
use objects_contract_application::ports::{ReportError, ReportSink};
use objects_contract_application::report::{ScenarioOutcome, ScenarioReport};
use objects_contract_domain::TestResults;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::serialization::{SerializationError, to_json_stable_bytes};

const SUITE_LABEL: &str = "objects-contract";
const JSON_MIME: &str = "application/json";

/// Writes Allure result files into a directory.
#[derive(Debug, Clone)]
pub struct AllureResultsSink {
    dir: PathBuf,
}

impl AllureResultsSink {
    /// Creates a sink writing into `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_json<T: Serialize + Sync>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<(), ReportError> {
        let bytes = to_json_stable_bytes(value).map_err(serialization_error)?;
        tokio::fs::write(self.dir.join(file_name), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportSink for AllureResultsSink {
    async fn record(&self, report: &ScenarioReport) -> Result<(), ReportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut attachments = Vec::with_capacity(report.exchanges.len());
        for (index, exchange) in report.exchanges.exchanges().iter().enumerate() {
            let source = format!("{}-attachment.json", Uuid::new_v4());
            self.write_json(&source, exchange).await?;
            attachments.push(AllureAttachment {
                name: attachment_name(index, exchange),
                source,
                kind: JSON_MIME,
            });
        }

        let uuid = Uuid::new_v4();
        let result = AllureResult::from_report(uuid, report, attachments);
        let file_name = format!("{uuid}-result.json");
        self.write_json(&file_name, &result).await?;

        debug!(scenario = %report.name, file = %file_name, "wrote allure result");
        Ok(())
    }
}

fn serialization_error(error: SerializationError) -> ReportError {
    ReportError::Serialization(error.to_string())
}

fn attachment_name(index: usize, exchange: &Exchange) -> String {
    format!(
        "{}. {} {}",
        index + 1,
        exchange.request.method,
        exchange.request.url
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllureResult<'a> {
    uuid: Uuid,
    history_id: &'a str,
    name: &'a str,
    full_name: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_details: Option<StatusDetails<'a>>,
    stage: &'static str,
    start: i64,
    stop: i64,
    labels: Vec<AllureLabel<'a>>,
    steps: Vec<AllureStep<'a>>,
    attachments: Vec<AllureAttachment>,
}

impl<'a> AllureResult<'a> {
    fn from_report(
        uuid: Uuid,
        report: &'a ScenarioReport,
        attachments: Vec<AllureAttachment>,
    ) -> Self {
        let start = report.started_at.timestamp_millis();
        let stop = report.finished_at.timestamp_millis();
        Self {
            uuid,
            history_id: &report.name,
            name: &report.display_name,
            full_name: format!("{SUITE_LABEL}::{:02}_{}", report.order, report.name),
            status: report.outcome.label(),
            status_details: report
                .outcome
                .reason()
                .map(|message| StatusDetails { message }),
            stage: "finished",
            start,
            stop,
            labels: vec![
                AllureLabel {
                    name: "suite",
                    value: SUITE_LABEL,
                },
                AllureLabel {
                    name: "testMethod",
                    value: &report.name,
                },
            ],
            steps: report
                .checks
                .iter()
                .map(|check| AllureStep::from_check(check, &report.outcome, start, stop))
                .collect(),
            attachments,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusDetails<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct AllureLabel<'a> {
    name: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllureStep<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_details: Option<StatusDetails<'a>>,
    stage: &'static str,
    start: i64,
    stop: i64,
}

impl<'a> AllureStep<'a> {
    fn from_check(
        check: &'a TestResults,
        outcome: &'a ScenarioOutcome,
        start: i64,
        stop: i64,
    ) -> Self {
        let passed = check.all_passed();
        Self {
            name: &check.suite_name,
            status: if passed { "passed" } else { "failed" },
            status_details: if passed {
                None
            } else {
                outcome.reason().map(|message| StatusDetails { message })
            },
            stage: "finished",
            start,
            stop,
        }
    }
}

#[derive(Debug, Serialize)]
struct AllureAttachment {
    name: String,
    source: String,
    #[serde(rename = "type")]
    kind: &'static str,
}
