//! Shared crate-wide constants for devstrap.
//!
//! Centralizes magic values and default labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Literal token the operator must type before the database is dropped.
/// Compared case-sensitively and exactly against the entered line.
pub const CONFIRM_TOKEN: &str = "NUKE";

/// Group the invoking user must belong to in order to talk to the docker daemon without sudo.
pub const DOCKER_GROUP: &str = "docker";

/// Service name passed to `service <name> status|start`.
pub const DOCKER_SERVICE: &str = "docker";

/// Grace period after issuing a daemon start request, before later capability checks run.
pub const DAEMON_START_GRACE_MS: u64 = 3_000;

/// Environment-proxy tool (Linux only).
pub const PROXY_PROGRAM: &str = "dory";

/// Literal substring in `dory status` output that marks the proxy as stopped.
/// This is the only place the crate inspects collaborator output.
pub const PROXY_NOT_RUNNING: &str = "not running";

pub const COMPOSE_PROGRAM: &str = "docker-compose";
pub const COMPOSE_SERVICE: &str = "web";

pub const OVERRIDE_CONFIG: &str = "docker-compose.override.yml";
pub const OVERRIDE_TEMPLATE: &str = "docker-compose.override.yml.example";
pub const LOCK_FILE: &str = "Gemfile.lock";
pub const SCHEMA_FILE: &str = "db/schema.rb";

/// Marker set on the re-executed process after a group escalation.
pub const POST_ESCALATION_ENV: &str = "DEVSTRAP_POST_ESCALATION";

/// UUIDv5 namespace tag for deterministic plan IDs.
pub const NS_TAG: &str = "https://devstrap.dev/plan";

/// Subsystem label carried on every emitted fact.
pub const SUBSYSTEM: &str = "devstrap";

/// Process exit code for any aborted run.
pub const EXIT_FAILURE: i32 = 1;
