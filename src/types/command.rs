//! Structured external command invocations.
//!
//! Every collaborator (package manager, daemon control, compose, rails) is
//! described as a program plus an argument vector. Nothing is ever routed
//! through a shell, so arguments need no quoting. Arguments are `OsString`
//! so paths and forwarded argv reach the child byte for byte.
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::ffi::OsString;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Prefix this invocation with `sudo`.
    #[must_use]
    pub fn sudo(self) -> Self {
        Self {
            program: OsString::from("sudo"),
            args: std::iter::once(self.program).chain(self.args).collect(),
        }
    }

    /// Program followed by its arguments, space separated. Display only;
    /// non-UTF-8 bytes are shown lossily.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut s = self.program.to_string_lossy().into_owned();
        for a in &self.args {
            s.push(' ');
            s.push_str(&a.to_string_lossy());
        }
        s
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

// Serialized for reports as its display argv.
impl Serialize for Invocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.args.len() + 1))?;
        seq.serialize_element(&self.program.to_string_lossy())?;
        for a in &self.args {
            seq.serialize_element(&a.to_string_lossy())?;
        }
        seq.end()
    }
}

/// Captured result of a probe invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    #[must_use]
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }
}
