use devstrap::types::RunOutcome;

use crate::helpers::Harness;

#[test]
fn linux_only_steps_never_touch_other_hosts() {
    let h = Harness::other_os();
    let report = h.bootstrap().run();
    assert!(matches!(report.outcome, RunOutcome::Completed), "{:?}", report.outcome);

    for call in h.runner.all() {
        assert!(!call.starts_with("service "), "{call}");
        assert!(!call.contains("service docker"), "{call}");
        assert!(!call.contains("usermod"), "{call}");
        assert!(!call.starts_with("dory"), "{call}");
        assert!(call != "id -Gn", "{call}");
    }
    for step in ["docker-daemon", "docker-group", "dory"] {
        assert!(report.outcome_of(step).is_none(), "{step} ran on a non-Linux host");
    }
}

#[test]
fn shared_steps_still_run_on_other_hosts() {
    let h = Harness::other_os();
    let report = h.bootstrap().run();
    assert_eq!(report.exit_code(), Some(0));
    let runs = h.runner.runs();
    assert_eq!(runs.first().map(String::as_str), Some("docker-compose build"));
    assert!(runs.iter().any(|c| c.ends_with("db:seed")));
}
