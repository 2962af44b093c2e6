use serde::Serialize;
use uuid::Uuid;

use super::command::Invocation;
use crate::api::errors::ApiError;
use crate::constants::EXIT_FAILURE;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// Guard held; action not executed.
    Skipped,
    Done,
    /// Action succeeded on the retry after a permission fallback.
    Remediated,
    /// Best-effort action failed; the message is kept for reporting.
    Suppressed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub outcome: StepOutcome,
}

/// Terminal state of one pass over the plan.
#[derive(Clone, Debug)]
pub enum RunOutcome {
    Completed,
    /// The process must be replaced with this invocation; nothing after the
    /// escalating step has run.
    ReExecRequested(Invocation),
    Aborted(ApiError),
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub plan_id: Uuid,
    pub run_id: Uuid,
    pub steps: Vec<StepRecord>,
    pub outcome: RunOutcome,
    pub duration_ms: u64,
}

impl RunReport {
    /// Exit status for a finished run; `None` when a re-exec is pending.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self.outcome {
            RunOutcome::Completed => Some(0),
            RunOutcome::ReExecRequested(_) => None,
            RunOutcome::Aborted(_) => Some(EXIT_FAILURE),
        }
    }

    #[must_use]
    pub fn outcome_of(&self, step: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|r| r.name == step).map(|r| &r.outcome)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match &self.outcome {
            RunOutcome::Aborted(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|r| pred(&r.outcome)).count()
    }
}
