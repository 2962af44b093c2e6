// Structured fact emission for run stages.
//
// Every fact carries a minimal envelope: `schema_version`, `ts`, `plan_id`,
// `run_id`, `stage`, `decision`. Step-scoped facts add `step`.
use serde_json::{json, Value};

use crate::api::errors::{id_str, ApiError};
use crate::constants::SUBSYSTEM;
use crate::logging::redact::now_iso;
use crate::logging::FactsEmitter;

pub(crate) const SCHEMA_VERSION: i64 = 1;

pub(crate) struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub plan_id: String,
    pub run_id: String,
}

impl<'a> AuditCtx<'a> {
    pub(crate) fn new(facts: &'a dyn FactsEmitter, plan_id: String, run_id: String) -> Self {
        Self {
            facts,
            plan_id,
            run_id,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Stage {
    RunStart,
    Guard,
    Confirm,
    Action,
    Fallback,
    Result,
    Summary,
}

impl Stage {
    const fn as_event(self) -> &'static str {
        match self {
            Self::RunStart => "run.start",
            Self::Guard => "step.guard",
            Self::Confirm => "step.confirm",
            Self::Action => "step.action",
            Self::Fallback => "step.fallback",
            Self::Result => "step.result",
            Self::Summary => "run.summary",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub(crate) fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn run_start(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::RunStart) }
    pub fn guard(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Guard) }
    pub fn confirm(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Confirm) }
    pub fn action(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Action) }
    pub fn fallback(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Fallback) }
    pub fn result(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Result) }
    pub fn summary(&self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Summary) }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    #[must_use]
    pub fn step(mut self, name: &str) -> Self {
        self.fields.insert("step".into(), json!(name));
        self
    }

    #[must_use]
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn merge(mut self, extra: &Value) -> Self {
        if let Some(obj) = extra.as_object() {
            for (k, v) in obj {
                self.fields.insert(k.clone(), v.clone());
            }
        }
        self
    }

    /// Attach `error`, `error_id` and `exit_code` for a fatal error.
    #[must_use]
    pub fn error(self, err: &ApiError) -> Self {
        self.merge(&json!({
            "error": err.to_string(),
            "error_id": id_str(err.id()),
            "exit_code": err.exit_code(),
        }))
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = self.fields;
        fields.entry("decision").or_insert(json!(decision.as_str()));
        fields.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
        fields.entry("ts").or_insert(json!(now_iso()));
        fields.entry("plan_id").or_insert(json!(self.ctx.plan_id));
        fields.entry("run_id").or_insert(json!(self.ctx.run_id));
        self.ctx
            .facts
            .emit(SUBSYSTEM, self.stage.as_event(), decision.as_str(), Value::Object(fields));
    }

    pub fn emit_success(self) { self.emit(Decision::Success) }
    pub fn emit_failure(self) { self.emit(Decision::Failure) }
    pub fn emit_warn(self) { self.emit(Decision::Warn) }
}
