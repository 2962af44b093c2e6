use std::path::PathBuf;
use thiserror::Error;

use crate::constants::EXIT_FAILURE;

/// Fatal conditions that end a run. None of these are ever suppressed,
/// not even on best-effort steps.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(String),
    #[error("declined: {0}")]
    Declined(String),
    #[error("no input available for prompt: {0}")]
    NonInteractive(String),
    #[error("step '{step}' failed: {msg}")]
    StepFailed { step: String, msg: String },
    #[error("step '{step}' still failing after permission fallback on {path}: {msg}")]
    PermissionFallbackFailed {
        step: String,
        path: String,
        msg: String,
    },
    #[error("privilege escalation failed: {0}")]
    EscalationFailed(String),
}

impl ApiError {
    #[must_use]
    pub const fn id(&self) -> ErrorId {
        match self {
            Self::UnsupportedEnvironment(_) => ErrorId::E_UNSUPPORTED_ENV,
            Self::Declined(_) => ErrorId::E_DECLINED,
            Self::NonInteractive(_) => ErrorId::E_NON_INTERACTIVE,
            Self::StepFailed { .. } => ErrorId::E_STEP_FAILED,
            Self::PermissionFallbackFailed { .. } => ErrorId::E_PERMISSION,
            Self::EscalationFailed(_) => ErrorId::E_ESCALATION,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        exit_code_for(self.id())
    }
}

/// Failure of a single step action, before the runner applies its
/// fallback, best-effort, and abort policy.
#[derive(Debug, Error)]
pub enum StepError {
    /// Permission failure on a managed artifact; eligible for the permission fallback.
    #[error("permission denied on {}: {msg}", .path.display())]
    Permission { path: PathBuf, msg: String },
    #[error("`{command}` exited with status {}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Command { command: String, code: Option<i32> },
    #[error("{0}")]
    Io(String),
    /// Never downgraded by the runner.
    #[error(transparent)]
    Fatal(#[from] ApiError),
}

// Stable identifiers emitted on failure facts.
// We intentionally keep SCREAMING_SNAKE_CASE to match emitted IDs.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_UNSUPPORTED_ENV,
    E_DECLINED,
    E_NON_INTERACTIVE,
    E_STEP_FAILED,
    E_PERMISSION,
    E_ESCALATION,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_UNSUPPORTED_ENV => "E_UNSUPPORTED_ENV",
        ErrorId::E_DECLINED => "E_DECLINED",
        ErrorId::E_NON_INTERACTIVE => "E_NON_INTERACTIVE",
        ErrorId::E_STEP_FAILED => "E_STEP_FAILED",
        ErrorId::E_PERMISSION => "E_PERMISSION",
        ErrorId::E_ESCALATION => "E_ESCALATION",
    }
}

/// Every failure class exits 1; the id is what distinguishes them in facts.
#[must_use]
pub const fn exit_code_for(_id: ErrorId) -> i32 {
    EXIT_FAILURE
}
