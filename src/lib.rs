#![forbid(unsafe_code)]
//! devstrap: idempotent bootstrap of a local development environment.
//!
//! Execution model highlights:
//! - A fixed, ordered plan of steps; each step is a guard (already satisfied?) around an action.
//! - Guards are re-derived from the live system on every run; there is no state file.
//! - Destructive steps need an exact confirmation token; a decline aborts the run.
//! - Group escalation ends the run with a re-exec request that the driver turns into process replacement.
//! - External collaborators are structured invocations, never shell strings.

pub mod adapters;
pub mod api;
pub mod constants;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod preflight;
pub mod privilege;
pub mod types;

pub use api::*;
