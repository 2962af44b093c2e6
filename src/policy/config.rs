use super::types::{Artifacts, Compose, Database, Dependencies, Docker, Prompts, Proxy};

/// Policy holds every knob of a bootstrap run.
///
/// There is no configuration file; callers start from `Policy::default()` and
/// adjust fields before building a [`Bootstrap`](crate::Bootstrap).
///
/// # Example
/// ```rust
/// use devstrap::policy::{HeadlessPolicy, Policy};
/// let mut policy = Policy::default();
/// policy.docker.start_grace = std::time::Duration::ZERO;
/// policy.prompts.headless = HeadlessPolicy::Decline;
/// assert_eq!(policy.database.confirm_token, "NUKE");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub dependencies: Dependencies,
    pub docker: Docker,
    pub proxy: Proxy,
    pub compose: Compose,
    pub artifacts: Artifacts,
    pub database: Database,
    pub prompts: Prompts,
}
