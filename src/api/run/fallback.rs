//! Permission fallback: one remediation, one retry.

use serde_json::json;
use std::path::Path;

use log::Level;

use super::{handlers, Env};
use crate::api::errors::{ApiError, StepError};
use crate::logging::StageLogger;
use crate::types::{Invocation, Step, StepOutcome};

/// The step declares a fallback and the failure is on that exact file.
pub(super) fn applies(env: &Env<'_>, step: &Step, path: &Path) -> bool {
    step.fallback
        .as_ref()
        .is_some_and(|f| env.ctx.resolve(&f.target) == path)
}

/// Create the file with privilege, relax its mode, and retry the action once.
/// Any failure past this point is fatal.
pub(super) fn remediate_and_retry(
    env: &Env<'_>,
    step: &Step,
    path: &Path,
    first_error: &str,
    slog: &StageLogger<'_>,
) -> Result<StepOutcome, ApiError> {
    let shown = path.display().to_string();
    env.audit.log(
        Level::Warn,
        &format!("{shown} is not writable ({first_error}); fixing permissions with sudo"),
    );
    let fail = |msg: String| ApiError::PermissionFallbackFailed {
        step: step.name.clone(),
        path: shown.clone(),
        msg,
    };

    for inv in remediation(path) {
        if let Err(e) = handlers::run_checked(env.runner, &inv) {
            let err = fail(e.to_string());
            slog.fallback().step(&step.name).error(&err).emit_failure();
            return Err(err);
        }
    }
    slog.fallback()
        .step(&step.name)
        .field("path", json!(shown))
        .emit_success();

    match handlers::execute(env, step) {
        Ok(_) => Ok(StepOutcome::Remediated),
        Err(StepError::Fatal(e)) => Err(e),
        Err(e) => Err(fail(e.to_string())),
    }
}

/// `sudo touch <path>` then `sudo chmod a+rw <path>`.
pub(super) fn remediation(path: &Path) -> [Invocation; 2] {
    [
        Invocation::new("touch").arg(path).sudo(),
        Invocation::new("chmod").arg("a+rw").arg(path).sudo(),
    ]
}
