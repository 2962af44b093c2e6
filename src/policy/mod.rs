//! Run configuration and operator gating.
//!
//! Submodules:
//! - `config`: the grouped `Policy` struct
//! - `types`: policy sub-structs, package manager and headless behaviour
//! - `gating`: confirmation and consent prompts

pub mod config;
pub mod gating;
pub mod types;

pub use config::Policy;
pub use gating::ConfirmationGate;
pub use types::{HeadlessPolicy, PackageManager};
