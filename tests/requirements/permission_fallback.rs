use devstrap::errors::{id_str, ApiError};
use devstrap::types::StepOutcome;
use serde_json::Value;

use crate::helpers::Harness;

fn privileged(h: &Harness) -> Vec<String> {
    h.runner
        .runs()
        .into_iter()
        .filter(|c| c.starts_with("sudo touch") || c.starts_with("sudo chmod"))
        .collect()
}

#[test]
fn one_remediation_then_retry_succeeds() {
    let h = Harness::healthy_linux();
    let lock = h.root.file("Gemfile.lock");
    h.fs.deny_touch(&lock, 1);
    let report = h.bootstrap().run();

    assert_eq!(report.outcome_of("gemfile-lock"), Some(&StepOutcome::Remediated));
    assert_eq!(
        privileged(&h),
        vec![
            format!("sudo touch {}", lock.display()),
            format!("sudo chmod a+rw {}", lock.display()),
        ]
    );
    assert_eq!(h.fs.touches.lock().unwrap().iter().filter(|p| **p == lock).count(), 2);
    assert_eq!(report.exit_code(), Some(0));
    assert!(h.runner.runs().contains(&"docker-compose run --rm web bundle install".to_string()));
}

#[test]
fn failure_after_remediation_is_fatal() {
    let h = Harness::healthy_linux();
    let lock = h.root.file("Gemfile.lock");
    h.fs.deny_touch(&lock, 2);
    let report = h.bootstrap().run();

    let err = report.error().expect("aborted");
    assert!(
        matches!(err, ApiError::PermissionFallbackFailed { step, .. } if step == "gemfile-lock"),
        "{err:?}"
    );
    assert_eq!(id_str(err.id()), "E_PERMISSION");
    assert_eq!(report.exit_code(), Some(1));
    assert_eq!(privileged(&h).len(), 2, "remediation must run exactly once");
    assert!(!h.runner.runs().iter().any(|c| c.contains("bundle install")));

    let result = h.facts.find("step.result", Some("gemfile-lock")).expect("result fact");
    assert_eq!(result["error_id"], Value::from("E_PERMISSION"));
    assert_eq!(result["decision"], Value::from("failure"));
}

#[test]
fn failing_remediation_command_is_fatal() {
    let h = Harness::healthy_linux();
    let schema = h.root.file("db/schema.rb");
    h.fs.deny_touch(&schema, 1);
    h.runner.fail(&format!("sudo touch {}", schema.display()), 1);
    let report = h.bootstrap().run();

    assert!(
        matches!(report.error(), Some(ApiError::PermissionFallbackFailed { step, .. }) if step == "database.schema"),
        "{:?}",
        report.outcome
    );
    assert!(!h.runner.runs().iter().any(|c| c.starts_with("sudo chmod")));
    assert!(!h.runner.runs().iter().any(|c| c.ends_with("db:create")));
}
