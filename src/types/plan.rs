use serde::Serialize;
use std::path::PathBuf;

use super::command::Invocation;

/// Something a guard can ask the presence checker about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Capability {
    /// An executable with this name exists on the search path.
    CommandOnPath(String),
    /// `service <name> status` exits 0.
    DaemonRunning(String),
    /// The current process already carries this supplementary group.
    GroupMember(String),
    /// The run is executing as uid 0.
    Root,
    /// The environment proxy reports itself as running.
    ProxyRunning,
    /// The application database answers a connection probe.
    DatabaseReachable,
    /// A project-relative file exists.
    FileExists(PathBuf),
}

/// Already-satisfied predicate over capabilities. When it holds, the step is a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Guard {
    /// Never satisfied; the action always runs. Used for idempotent actions.
    Never,
    Present(Capability),
    Absent(Capability),
    All(Vec<Capability>),
    Any(Vec<Capability>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RequirementSource {
    /// Installed through the OS package manager under this package name.
    Package(String),
    /// Installed through the gem installer under this gem name.
    Gem(String),
}

/// A command that must exist on PATH and where to get it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub command: String,
    pub source: RequirementSource,
}

impl Requirement {
    pub fn package(command: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            source: RequirementSource::Package(package.into()),
        }
    }

    pub fn gem(command: impl Into<String>, gem: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            source: RequirementSource::Gem(gem.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Install whichever requirements are missing from PATH.
    InstallDependencies { requirements: Vec<Requirement> },
    /// Ask the service manager to start a daemon, then wait for the grace period.
    StartDaemon { service: String },
    /// Make sure the current user is in `group`, re-executing if it had to be added.
    JoinGroup { group: String },
    /// Copy `template` to `path` unless `path` already exists.
    MaterializeConfig { path: PathBuf, template: PathBuf },
    /// Create the file if needed and update its mtime.
    TouchArtifact { path: PathBuf },
    /// Run an external command with inherited stdio.
    Exec(Invocation),
}

/// Remediation for a permission failure on `target`: create it with privilege and relax its mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionFallback {
    pub target: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub name: String,
    /// Progress line shown before the step is evaluated.
    pub summary: String,
    pub guard: Guard,
    pub action: Action,
    pub destructive: bool,
    pub best_effort: bool,
    pub fallback: Option<PermissionFallback>,
}

impl Step {
    pub fn new(name: impl Into<String>, summary: impl Into<String>, guard: Guard, action: Action) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            guard,
            action,
            destructive: false,
            best_effort: false,
            fallback: None,
        }
    }

    #[must_use]
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    #[must_use]
    pub fn best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, target: impl Into<PathBuf>) -> Self {
        self.fallback = Some(PermissionFallback {
            target: target.into(),
        });
        self
    }
}

/// Ordered, fixed sequence of steps. Later steps assume earlier ones completed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}
