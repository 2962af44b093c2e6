use std::path::Path;
use std::thread;

use log::Level;

use super::Env;
use crate::adapters::CommandRunner;
use crate::api::errors::{ApiError, StepError};
use crate::fs::{ensure_file, Materialized};
use crate::policy::PackageManager;
use crate::preflight::checks::which_on_path;
use crate::privilege::{EscalationOutcome, PrivilegeEscalator};
use crate::types::errors::ErrorKind;
use crate::types::{Action, Invocation, Requirement, RequirementSource, Step};

pub(super) enum Executed {
    Done,
    ReExec(Invocation),
}

pub(super) fn execute(env: &Env<'_>, step: &Step) -> Result<Executed, StepError> {
    match &step.action {
        Action::InstallDependencies { requirements } => {
            install_missing(env, requirements)?;
        }
        Action::StartDaemon { service } => {
            run_checked(env.runner, &Invocation::new("service").args([service.as_str(), "start"]).sudo())?;
            let grace = env.policy.docker.start_grace;
            if !grace.is_zero() {
                thread::sleep(grace);
            }
        }
        Action::JoinGroup { group } => {
            let escalator = PrivilegeEscalator::new(env.ctx, env.runner, env.checker);
            if let EscalationOutcome::AddedAndReexeced(inv) =
                escalator.ensure_group_membership(env.ctx.user(), group)?
            {
                return Ok(Executed::ReExec(inv));
            }
        }
        Action::MaterializeConfig { path, template } => {
            let dst = env.ctx.resolve(path);
            match ensure_file(env.fs, &dst, &env.ctx.resolve(template)) {
                Ok(Materialized::Copied) => env
                    .audit
                    .log(Level::Info, &format!("Created {} from {}", path.display(), template.display())),
                Ok(Materialized::AlreadyPresent) => {}
                Err(e) => return Err(StepError::Io(e.to_string())),
            }
        }
        Action::TouchArtifact { path } => touch(env, &env.ctx.resolve(path))?,
        Action::Exec(inv) => run_checked(env.runner, inv)?,
    }
    Ok(Executed::Done)
}

fn touch(env: &Env<'_>, path: &Path) -> Result<(), StepError> {
    env.fs.touch(path).map_err(|e| {
        if e.kind == ErrorKind::Permission {
            StepError::Permission {
                path: path.to_path_buf(),
                msg: e.msg,
            }
        } else {
            StepError::Io(e.to_string())
        }
    })
}

/// Run with inherited stdio; a non-zero exit or a spawn failure is an error.
pub(super) fn run_checked(runner: &dyn CommandRunner, inv: &Invocation) -> Result<(), StepError> {
    match runner.run(inv) {
        Ok(out) if out.success() => Ok(()),
        Ok(out) => Err(StepError::Command {
            command: inv.command_line(),
            code: out.code,
        }),
        Err(e) => Err(StepError::Io(e.to_string())),
    }
}

fn install_missing(env: &Env<'_>, requirements: &[Requirement]) -> Result<(), StepError> {
    let missing = env.checker.missing(requirements);
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(|r| r.command.as_str()).collect();
    env.audit
        .log(Level::Info, &format!("Missing: {}", names.join(", ")));

    let manager = PackageManager::for_os(env.ctx.os());
    let search = env.ctx.search_path().map(|p| p.as_os_str());
    if which_on_path(manager.program(), search).is_none() {
        return Err(ApiError::UnsupportedEnvironment(format!(
            "{} is required to install {} on {}",
            manager.program(),
            names.join(", "),
            env.ctx.os().as_str()
        ))
        .into());
    }

    let mut packages: Vec<String> = Vec::new();
    let mut gems: Vec<String> = Vec::new();
    for r in &missing {
        match &r.source {
            RequirementSource::Package(p) => packages.push(p.clone()),
            RequirementSource::Gem(g) => gems.push(g.clone()),
        }
    }

    let privileged = (manager.privileged() && !packages.is_empty()) || !gems.is_empty();
    if privileged
        && !env
            .gate
            .consent("Install missing dependencies with sudo? [y/N] ")?
    {
        return Err(ApiError::Declined("dependency installation".to_string()).into());
    }

    if !packages.is_empty() {
        run_checked(env.runner, &manager.install(&packages))?;
    }
    for gem in gems {
        run_checked(env.runner, &Invocation::new("gem").args(["install".to_string(), gem]).sudo())?;
    }
    Ok(())
}
