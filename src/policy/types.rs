use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    COMPOSE_PROGRAM, COMPOSE_SERVICE, CONFIRM_TOKEN, DAEMON_START_GRACE_MS, DOCKER_GROUP,
    DOCKER_SERVICE, LOCK_FILE, OVERRIDE_CONFIG, OVERRIDE_TEMPLATE, PROXY_NOT_RUNNING,
    PROXY_PROGRAM, SCHEMA_FILE,
};
use crate::types::{Invocation, OsFamily, Requirement};

/// What to do when a prompt hits end of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadlessPolicy {
    /// Abort with a distinct non-interactive error.
    #[default]
    FailFast,
    /// Treat end of input like an empty answer, which declines.
    Decline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Brew,
}

impl PackageManager {
    /// The one manager supported for each OS family.
    #[must_use]
    pub const fn for_os(os: OsFamily) -> Self {
        match os {
            OsFamily::Linux => Self::Apt,
            OsFamily::Other => Self::Brew,
        }
    }

    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Brew => "brew",
        }
    }

    /// Installs through this manager need root and therefore operator consent.
    #[must_use]
    pub const fn privileged(self) -> bool {
        matches!(self, Self::Apt)
    }

    #[must_use]
    pub fn install(self, packages: &[String]) -> Invocation {
        match self {
            Self::Apt => Invocation::new(self.program())
                .args(["install", "-y"])
                .args(packages.iter().cloned())
                .sudo(),
            Self::Brew => Invocation::new(self.program())
                .arg("install")
                .args(packages.iter().cloned()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dependencies {
    pub linux: Vec<Requirement>,
    pub other: Vec<Requirement>,
}

impl Default for Dependencies {
    fn default() -> Self {
        Self {
            linux: vec![
                Requirement::package("docker", "docker.io"),
                Requirement::package("docker-compose", "docker-compose"),
                Requirement::gem(PROXY_PROGRAM, PROXY_PROGRAM),
            ],
            other: vec![
                Requirement::package("docker", "docker"),
                Requirement::package("docker-compose", "docker-compose"),
            ],
        }
    }
}

impl Dependencies {
    #[must_use]
    pub fn for_os(&self, os: OsFamily) -> &[Requirement] {
        match os {
            OsFamily::Linux => &self.linux,
            OsFamily::Other => &self.other,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Docker {
    pub service: String,
    pub group: String,
    pub start_grace: Duration,
}

impl Default for Docker {
    fn default() -> Self {
        Self {
            service: DOCKER_SERVICE.to_string(),
            group: DOCKER_GROUP.to_string(),
            start_grace: Duration::from_millis(DAEMON_START_GRACE_MS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Proxy {
    pub program: String,
    pub not_running: String,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            program: PROXY_PROGRAM.to_string(),
            not_running: PROXY_NOT_RUNNING.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Compose {
    pub program: String,
    pub service: String,
}

impl Default for Compose {
    fn default() -> Self {
        Self {
            program: COMPOSE_PROGRAM.to_string(),
            service: COMPOSE_SERVICE.to_string(),
        }
    }
}

impl Compose {
    /// `docker-compose run --rm <service> <args...>`
    #[must_use]
    pub fn run<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Invocation::new(&self.program)
            .args(["run", "--rm", self.service.as_str()])
            .args(args)
    }
}

/// Project-relative paths of the files the run manages.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub override_config: PathBuf,
    pub override_template: PathBuf,
    pub lock_file: PathBuf,
    pub schema_file: PathBuf,
}

impl Default for Artifacts {
    fn default() -> Self {
        Self {
            override_config: PathBuf::from(OVERRIDE_CONFIG),
            override_template: PathBuf::from(OVERRIDE_TEMPLATE),
            lock_file: PathBuf::from(LOCK_FILE),
            schema_file: PathBuf::from(SCHEMA_FILE),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pub confirm_token: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            confirm_token: CONFIRM_TOKEN.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Prompts {
    pub headless: HeadlessPolicy,
}
