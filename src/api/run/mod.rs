//! Step runner: evaluates each step's guard and executes its action in plan order.
//!
//! Side-effects:
//! - Prints a progress line per step through the `AuditSink`.
//! - Emits `run.start`, `step.guard`, `step.confirm`, `step.action`,
//!   `step.fallback`, `step.result` and `run.summary` facts.
//! - Stops at the first unrecovered failure; nothing after it runs.
//! - Stops after a step that requests a re-exec, leaving the restart to the driver.

use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::adapters::{CommandRunner, FileOps};
use crate::api::errors::{ApiError, StepError};
use crate::api::Bootstrap;
use crate::logging::audit::AuditCtx;
use crate::logging::{AuditSink, FactsEmitter, StageLogger};
use crate::policy::{ConfirmationGate, Policy};
use crate::preflight::PresenceChecker;
use crate::types::ids::{new_run_id, plan_id};
use crate::types::{
    Context, Invocation, Plan, RunOutcome, RunReport, Step, StepOutcome, StepRecord,
};

mod fallback;
mod handlers;
mod summary;

/// Borrowed collaborators handed to every handler.
pub(crate) struct Env<'a> {
    pub ctx: &'a Context,
    pub policy: &'a Policy,
    pub runner: &'a dyn CommandRunner,
    pub fs: &'a dyn FileOps,
    pub checker: &'a PresenceChecker<'a>,
    pub gate: &'a ConfirmationGate<'a>,
    pub audit: &'a dyn AuditSink,
}

pub(crate) enum Flow {
    Next(StepOutcome),
    ReExec(Invocation),
}

pub(crate) fn run<E: FactsEmitter, A: AuditSink>(api: &Bootstrap<E, A>, plan: &Plan) -> RunReport {
    let t0 = Instant::now();
    let pid = plan_id(plan);
    let run_id = new_run_id();
    let tctx = AuditCtx::new(&api.facts, pid.to_string(), run_id.to_string());
    let slog = StageLogger::new(&tctx);

    let checker = PresenceChecker::new(&api.ctx, &api.policy, api.runner.as_ref(), api.fs.as_ref());
    let gate = ConfirmationGate::new(api.prompter.as_ref(), api.policy.prompts.headless);
    let env = Env {
        ctx: &api.ctx,
        policy: &api.policy,
        runner: api.runner.as_ref(),
        fs: api.fs.as_ref(),
        checker: &checker,
        gate: &gate,
        audit: &api.audit,
    };

    slog.run_start()
        .merge(&json!({
            "os": api.ctx.os().as_str(),
            "post_escalation": api.ctx.post_escalation(),
            "steps": plan.names(),
        }))
        .emit_success();

    let mut records: Vec<StepRecord> = Vec::new();
    let mut outcome = RunOutcome::Completed;
    for step in &plan.steps {
        match run_step(&env, step, &slog) {
            Ok(Flow::Next(o)) => {
                records.push(StepRecord {
                    name: step.name.clone(),
                    outcome: o,
                });
            }
            Ok(Flow::ReExec(inv)) => {
                records.push(StepRecord {
                    name: step.name.clone(),
                    outcome: StepOutcome::Done,
                });
                slog.result()
                    .step(&step.name)
                    .field("outcome", json!("reexec"))
                    .field("reexec", json!(inv.command_line()))
                    .emit_success();
                outcome = RunOutcome::ReExecRequested(inv);
                break;
            }
            Err(e) => {
                api.audit.log(Level::Error, &e.to_string());
                slog.result().step(&step.name).error(&e).emit_failure();
                outcome = RunOutcome::Aborted(e);
                break;
            }
        }
    }

    let duration_ms = u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX);
    let report = RunReport {
        plan_id: pid,
        run_id,
        steps: records,
        outcome,
        duration_ms,
    };
    summary::emit(&report, &slog, &api.audit);
    report
}

fn run_step(env: &Env<'_>, step: &Step, slog: &StageLogger<'_>) -> Result<Flow, ApiError> {
    env.audit.log(Level::Info, &step.summary);

    let satisfied = env.checker.satisfied(&step.guard);
    slog.guard()
        .step(&step.name)
        .field("satisfied", json!(satisfied))
        .emit_success();
    if satisfied {
        env.audit.log(Level::Debug, &format!("{}: already satisfied", step.name));
        slog.result()
            .step(&step.name)
            .field("outcome", json!("skipped"))
            .emit_success();
        return Ok(Flow::Next(StepOutcome::Skipped));
    }

    if step.destructive {
        confirm_destructive(env, step, slog)?;
    }

    slog.action().step(&step.name).emit_success();
    let first = handlers::execute(env, step);
    let outcome = match first {
        Ok(handlers::Executed::Done) => StepOutcome::Done,
        Ok(handlers::Executed::ReExec(inv)) => return Ok(Flow::ReExec(inv)),
        Err(StepError::Fatal(e)) => return Err(e),
        Err(StepError::Permission { path, msg }) if fallback::applies(env, step, &path) => {
            fallback::remediate_and_retry(env, step, &path, &msg, slog)?
        }
        Err(e) if step.best_effort => {
            env.audit
                .log(Level::Warn, &format!("{} failed, continuing: {e}", step.name));
            StepOutcome::Suppressed(e.to_string())
        }
        Err(e) => {
            return Err(ApiError::StepFailed {
                step: step.name.clone(),
                msg: e.to_string(),
            })
        }
    };

    let label = match &outcome {
        StepOutcome::Skipped => "skipped",
        StepOutcome::Done => "done",
        StepOutcome::Remediated => "remediated",
        StepOutcome::Suppressed(_) => "suppressed",
    };
    let ev = slog.result().step(&step.name).field("outcome", json!(label));
    if let StepOutcome::Suppressed(msg) = &outcome {
        ev.field("error", json!(msg)).emit_warn();
    } else {
        ev.emit_success();
    }
    Ok(Flow::Next(outcome))
}

/// Ask for the literal token right before the destructive action. Anything
/// else ends the run.
fn confirm_destructive(env: &Env<'_>, step: &Step, slog: &StageLogger<'_>) -> Result<(), ApiError> {
    let token = &env.policy.database.confirm_token;
    let prompt = format!(
        "{} will destroy existing data. Type {token} to continue: ",
        step.name
    );
    let confirmed = match env.gate.confirm(&prompt, token) {
        Ok(c) => c,
        Err(e) => {
            slog.confirm().step(&step.name).error(&e).emit_failure();
            return Err(e);
        }
    };
    if !confirmed {
        let e = ApiError::Declined(format!("{} was not confirmed", step.name));
        slog.confirm().step(&step.name).error(&e).emit_failure();
        return Err(e);
    }
    slog.confirm().step(&step.name).emit_success();
    Ok(())
}
