use devstrap::types::StepOutcome;

use crate::helpers::Harness;

const CONFIG: &str = "docker-compose.override.yml";

#[test]
fn existing_override_is_left_untouched() {
    let h = Harness::healthy_linux();
    h.root.write(CONFIG, "services:\n  web:\n    ports: ['4000:3000']\n");
    let report = h.bootstrap().run();

    assert_eq!(report.outcome_of("override-config"), Some(&StepOutcome::Skipped));
    assert_eq!(h.fs.copy_count(), 0);
    assert_eq!(
        std::fs::read_to_string(h.root.file(CONFIG)).unwrap(),
        "services:\n  web:\n    ports: ['4000:3000']\n"
    );
}

#[test]
fn missing_override_is_copied_from_the_template() {
    let h = Harness::healthy_linux();
    let report = h.bootstrap().run();

    assert_eq!(report.outcome_of("override-config"), Some(&StepOutcome::Done));
    assert_eq!(std::fs::read_to_string(h.root.file(CONFIG)).unwrap(), "services: {}\n");
}

#[test]
fn missing_template_does_not_stop_the_run() {
    let h = Harness::healthy_linux();
    std::fs::remove_file(h.root.file("docker-compose.override.yml.example")).unwrap();
    let report = h.bootstrap().run();

    assert!(
        matches!(report.outcome_of("override-config"), Some(StepOutcome::Suppressed(_))),
        "{:?}",
        report.outcome_of("override-config")
    );
    assert!(!h.root.file(CONFIG).exists());
    assert_eq!(report.exit_code(), Some(0));
    assert!(h.runner.runs().contains(&"docker-compose build".to_string()));
}
