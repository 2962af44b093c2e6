//! Operator gates in front of privileged and destructive actions.
//!
//! A negative or ambiguous answer never lets the action through. Callers
//! turn `Ok(false)` into a hard stop of the whole run, not a skipped step.
use crate::adapters::Prompter;
use crate::api::errors::ApiError;
use crate::policy::types::HeadlessPolicy;

pub struct ConfirmationGate<'a> {
    prompter: &'a dyn Prompter,
    headless: HeadlessPolicy,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(prompter: &'a dyn Prompter, headless: HeadlessPolicy) -> Self {
        Self { prompter, headless }
    }

    /// True iff the entered line equals `expected` exactly (case-sensitive,
    /// no trimming beyond the line terminator).
    pub fn confirm(&self, prompt: &str, expected: &str) -> Result<bool, ApiError> {
        Ok(self.answer(prompt)?.is_some_and(|line| line == expected))
    }

    /// Free-text y/n question defaulting to "n". `y` and `yes` in any case consent.
    pub fn consent(&self, prompt: &str) -> Result<bool, ApiError> {
        Ok(self.answer(prompt)?.is_some_and(|line| {
            let line = line.trim().to_ascii_lowercase();
            line == "y" || line == "yes"
        }))
    }

    /// `Ok(None)` means "declined by default" after end of input under `HeadlessPolicy::Decline`.
    fn answer(&self, prompt: &str) -> Result<Option<String>, ApiError> {
        match self.prompter.read_line(prompt) {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => match self.headless {
                HeadlessPolicy::FailFast => Err(ApiError::NonInteractive(prompt.trim().to_string())),
                HeadlessPolicy::Decline => Ok(None),
            },
            Err(e) => Err(ApiError::NonInteractive(format!("{}: {e}", prompt.trim()))),
        }
    }
}
