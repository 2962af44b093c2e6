use serde_json::Value;

use crate::helpers::Harness;

#[test]
fn completed_run_emits_envelope_and_summary() {
    let h = Harness::healthy_linux();
    let report = h.bootstrap().run();
    assert_eq!(report.exit_code(), Some(0));

    let events = h.facts.redacted();
    assert_eq!(events.first().unwrap()["stage"], Value::from("run.start"));
    assert_eq!(events.last().unwrap()["stage"], Value::from("run.summary"));
    for e in &events {
        assert_eq!(e["plan_id"], Value::from(report.plan_id.to_string()));
        assert_eq!(e["ts"], Value::from(devstrap::logging::TS_ZERO));
        assert!(e.get("run_id").is_none());
        assert!(e.get("schema_version").is_some());
    }

    let summary = h.facts.find("run.summary", None).unwrap();
    assert_eq!(summary["outcome"], Value::from("completed"));
    assert_eq!(summary["skipped"], Value::from(5));
    assert_eq!(summary["done"], Value::from(8));

    let guard = h.facts.find("step.guard", Some("docker-daemon")).unwrap();
    assert_eq!(guard["satisfied"], Value::from(true));
}

#[test]
fn plan_id_is_stable_across_runs() {
    let h = Harness::healthy_linux();
    let a = h.bootstrap().run();
    let b = h.bootstrap_with(h.root.ctx(h.os)).plan();
    assert_eq!(a.plan_id, devstrap::types::plan_id(&b));
    let c = h.bootstrap().run();
    assert_eq!(a.plan_id, c.plan_id);
    assert_ne!(a.run_id, c.run_id);
}

#[test]
fn each_step_prints_its_progress_line_first() {
    let h = Harness::healthy_linux();
    h.bootstrap().run();
    let info = h.audit.info();
    let pos = |needle: &str| info.iter().position(|l| l == needle).unwrap_or(usize::MAX);
    assert!(pos("Checking dependencies") < pos("Building containers"));
    assert!(pos("Building containers") < pos("Seeding the database"));
    assert_eq!(info.last().map(String::as_str), Some("Development environment is ready"));
}

#[test]
fn declined_confirmation_is_recorded_as_a_failure_fact() {
    let h = Harness::healthy_linux();
    h.runner.update(|w| w.database_exists = true);
    h.prompter.answer("no");
    h.bootstrap().run();

    let confirm = h.facts.find("step.confirm", Some("database.drop")).unwrap();
    assert_eq!(confirm["decision"], Value::from("failure"));
    assert_eq!(confirm["error_id"], Value::from("E_DECLINED"));
    let summary = h.facts.find("run.summary", None).unwrap();
    assert_eq!(summary["outcome"], Value::from("aborted"));
    assert_eq!(summary["exit_code"], Value::from(1));
}
