use log::Level;
use serde_json::json;

use crate::logging::{AuditSink, StageLogger};
use crate::types::{RunOutcome, RunReport, StepOutcome};

pub(super) fn emit(report: &RunReport, slog: &StageLogger<'_>, audit: &dyn AuditSink) {
    let counts = json!({
        "skipped": report.count(|o| matches!(o, StepOutcome::Skipped)),
        "done": report.count(|o| matches!(o, StepOutcome::Done)),
        "remediated": report.count(|o| matches!(o, StepOutcome::Remediated)),
        "suppressed": report.count(|o| matches!(o, StepOutcome::Suppressed(_))),
        "duration_ms": report.duration_ms,
    });
    let ev = slog.summary().merge(&counts);
    match &report.outcome {
        RunOutcome::Completed => {
            ev.field("outcome", json!("completed")).emit_success();
            audit.log(Level::Info, "Development environment is ready");
        }
        RunOutcome::ReExecRequested(inv) => {
            ev.field("outcome", json!("reexec"))
                .field("reexec", json!(inv.command_line()))
                .emit_success();
        }
        RunOutcome::Aborted(e) => {
            ev.field("outcome", json!("aborted")).error(e).emit_failure();
        }
    }
}
