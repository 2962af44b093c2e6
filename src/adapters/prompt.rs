use std::io::{self, BufRead, Write};

use crate::types::errors::Result;

/// Line-oriented operator input.
pub trait Prompter: Send + Sync {
    /// Show `prompt` and read one line without its terminator.
    /// Returns `Ok(None)` at end of input (no operator attached).
    /// # Errors
    /// Returns an error when stdin or stdout cannot be used.
    fn read_line(&self, prompt: &str) -> Result<Option<String>>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        let mut out = io::stdout().lock();
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}

/// Remove a single trailing `\n` or `\r\n`. Other whitespace is kept so that
/// exact-match comparisons stay exact.
#[must_use]
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
