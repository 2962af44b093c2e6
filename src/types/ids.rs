//! Deterministic UUIDv5 identifiers for plans.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that
//! `plan_id` is reproducible across runs for the same ordered step sequence.
use uuid::Uuid;

use super::plan::Plan;
use crate::constants::NS_TAG;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Compute a deterministic UUIDv5 for a plan by serializing step names in order.
#[must_use]
pub fn plan_id(plan: &Plan) -> Uuid {
    let mut s = String::new();
    for step in &plan.steps {
        s.push_str(&step.name);
        s.push('\n');
    }
    Uuid::new_v5(&namespace(), s.as_bytes())
}

/// Fresh random identifier for one invocation of the run.
#[must_use]
pub fn new_run_id() -> Uuid {
    Uuid::new_v4()
}
