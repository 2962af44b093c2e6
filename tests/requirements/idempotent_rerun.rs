use devstrap::types::{RunOutcome, StepOutcome};

use crate::helpers::Harness;

fn is_provisioning(cmd: &str) -> bool {
    cmd.contains("apt-get")
        || cmd.contains("gem install")
        || cmd.contains("service docker start")
        || cmd.contains("usermod")
        || cmd == "dory up"
}

#[test]
fn second_run_repeats_no_setup() {
    let h = Harness::healthy_linux();
    std::fs::remove_file(h.root.bin().join("docker-compose")).unwrap();
    std::fs::remove_file(h.root.bin().join("dory")).unwrap();
    h.runner.update(|w| {
        w.daemon_running = false;
        w.proxy_running = false;
    });
    h.prompter.answer("y");

    let first = h.bootstrap().run();
    assert!(matches!(first.outcome, RunOutcome::Completed), "{:?}", first.outcome);
    let first_runs = h.runner.runs();
    assert!(first_runs.contains(&"sudo apt-get install -y docker-compose".to_string()));
    assert!(first_runs.contains(&"sudo gem install dory".to_string()));
    assert!(first_runs.contains(&"sudo service docker start".to_string()));
    assert!(first_runs.contains(&"dory up".to_string()));
    assert_eq!(h.fs.copy_count(), 1);

    // The database now exists, so the second run needs the destructive token.
    h.runner.clear();
    h.prompter.answer("NUKE");
    let second = h.bootstrap().run();
    assert!(matches!(second.outcome, RunOutcome::Completed), "{:?}", second.outcome);

    let redundant: Vec<String> = h.runner.runs().into_iter().filter(|c| is_provisioning(c)).collect();
    assert!(redundant.is_empty(), "repeated setup: {redundant:?}");
    assert_eq!(h.fs.copy_count(), 1, "override config copied twice");
    for step in ["dependencies", "docker-daemon", "docker-group", "dory", "override-config"] {
        assert_eq!(second.outcome_of(step), Some(&StepOutcome::Skipped), "{step}");
    }
}

#[test]
fn guards_are_rechecked_on_every_run() {
    let h = Harness::healthy_linux();
    h.bootstrap().run();
    // Something stopped the daemon between runs.
    h.runner.update(|w| w.daemon_running = false);
    h.runner.clear();
    h.prompter.answer("NUKE");
    let report = h.bootstrap().run();
    assert_eq!(report.outcome_of("docker-daemon"), Some(&StepOutcome::Done));
    assert_eq!(
        h.runner.runs().iter().filter(|c| c.as_str() == "sudo service docker start").count(),
        1
    );
    assert_eq!(report.exit_code(), Some(0));
}
