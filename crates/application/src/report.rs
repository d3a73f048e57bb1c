//! Scenario and suite reports.

use chrono::{DateTime, Utc};
use objects_contract_domain::TestResults;
use serde::Serialize;

use crate::capture::ExchangeLog;

/// Final state of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion did not hold.
    Failed {
        /// Expected vs actual for the failing field.
        reason: String,
    },
    /// The scenario could not complete (transport error, unusable response).
    Broken {
        /// What went wrong.
        reason: String,
    },
}

impl ScenarioOutcome {
    /// Returns true for `Passed`.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { reason } | Self::Broken { reason } => Some(reason),
        }
    }

    /// Short status label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Broken { .. } => "broken",
        }
    }
}

/// Everything known about one executed scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Position in the execution order.
    pub order: u8,
    /// Stable identifier, e.g. `post_creates_object`.
    pub name: String,
    /// Human-readable title.
    pub display_name: String,
    /// Final state.
    pub outcome: ScenarioOutcome,
    /// Assertion groups evaluated, in order.
    pub checks: Vec<TestResults>,
    /// Captured request/response pairs.
    pub exchanges: ExchangeLog,
    /// Start time.
    pub started_at: DateTime<Utc>,
    /// End time.
    pub finished_at: DateTime<Utc>,
}

impl ScenarioReport {
    /// Wall-clock duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Summary of a suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Scenario reports in execution order.
    pub scenarios: Vec<ScenarioReport>,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Number of passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|s| s.outcome.is_passed())
            .count()
    }

    /// Number of failed or broken scenarios.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    /// Returns true if every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Looks a scenario up by its identifier.
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}
