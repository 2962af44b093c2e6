//! Process-wide facts read exactly once at start.
//!
//! A `Context` is built by [`Context::detect`] (or by hand in tests) and then
//! only ever borrowed. Nothing downstream re-reads the environment, so a run
//! is a pure function of its context, its policy, and the collaborators it
//! talks to.
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::POST_ESCALATION_ENV;
use crate::types::errors::{Error, ErrorKind, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OsFamily {
    Linux,
    Other,
}

impl OsFamily {
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os_name(env::consts::OS)
    }

    #[must_use]
    pub fn from_os_name(name: &str) -> Self {
        if name == "linux" {
            Self::Linux
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn is_linux(self) -> bool {
        matches!(self, Self::Linux)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Context {
    os: OsFamily,
    user: String,
    root: bool,
    project_root: PathBuf,
    search_path: Option<OsString>,
    post_escalation: bool,
    program: PathBuf,
    args: Vec<OsString>,
}

impl Context {
    /// Minimal context for a given OS family, user, and project root.
    /// Search path and program default to the current process values.
    pub fn new(os: OsFamily, user: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            os,
            user: user.into(),
            root: false,
            project_root: project_root.into(),
            search_path: env::var_os("PATH"),
            post_escalation: false,
            program: PathBuf::from(env!("CARGO_PKG_NAME")),
            args: Vec::new(),
        }
    }

    /// Read OS family, user, working directory, PATH and the post-escalation
    /// marker from the running process.
    pub fn detect() -> Result<Self> {
        let user = env::var("USER")
            .or_else(|_| env::var("LOGNAME"))
            .map_err(|_| Error::new(ErrorKind::Io, "cannot determine current user"))?;
        let project_root = env::current_dir()?;
        let program = env::current_exe()?;
        Ok(Self {
            os: OsFamily::detect(),
            user,
            root: rustix::process::geteuid().is_root(),
            project_root,
            search_path: env::var_os("PATH"),
            post_escalation: env::var(POST_ESCALATION_ENV).is_ok_and(|v| v.trim() == "1"),
            program,
            args: env::args_os().skip(1).collect(),
        })
    }

    #[must_use]
    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_post_escalation(mut self, post: bool) -> Self {
        self.post_escalation = post;
        self
    }

    #[must_use]
    pub fn with_program<I, S>(mut self, program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn os(&self) -> OsFamily {
        self.os
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.root
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    #[must_use]
    pub fn search_path(&self) -> Option<&OsString> {
        self.search_path.as_ref()
    }

    #[must_use]
    pub const fn post_escalation(&self) -> bool {
        self.post_escalation
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Resolve a project-relative artifact path.
    #[must_use]
    pub fn resolve(&self, rel: &Path) -> PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.project_root.join(rel)
        }
    }
}
