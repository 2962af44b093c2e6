// Facade for API module; delegates to submodules under src/api/

use log::Level;

use crate::adapters::{
    CommandRunner, FileOps, ProcessReplacer, Prompter, StdFileOps, StdinPrompter, SystemRunner,
};
use crate::constants::EXIT_FAILURE;
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::Policy;
use crate::types::{Context, Plan, RunOutcome, RunReport};

pub mod errors;
mod plan;
mod run;

pub struct Bootstrap<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    ctx: Context,
    runner: Box<dyn CommandRunner>,
    prompter: Box<dyn Prompter>,
    fs: Box<dyn FileOps>,
}

impl<E: FactsEmitter, A: AuditSink> Bootstrap<E, A> {
    /// Wire a run with the system collaborators: real processes, stdin prompts
    /// and the local filesystem, all rooted at the context's project root.
    pub fn new(facts: E, audit: A, policy: Policy, ctx: Context) -> Self {
        Self {
            runner: Box::new(SystemRunner::in_dir(ctx.project_root())),
            prompter: Box::new(StdinPrompter),
            fs: Box::new(StdFileOps),
            facts,
            audit,
            policy,
            ctx,
        }
    }

    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn with_file_ops(mut self, fs: Box<dyn FileOps>) -> Self {
        self.fs = fs;
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The ordered step sequence for this context. Linux-only steps are absent on other OS families.
    pub fn plan(&self) -> Plan {
        plan::build(&self.ctx, &self.policy)
    }

    /// One pass over the default plan.
    pub fn run(&self) -> RunReport {
        self.run_plan(&self.plan())
    }

    pub fn run_plan(&self, plan: &Plan) -> RunReport {
        run::run(self, plan)
    }

    /// Top-level driver: run the plan and turn its terminal state into a
    /// process exit code. A requested re-exec is handed to `replacer`, which
    /// does not return on success.
    pub fn drive(&self, replacer: &dyn ProcessReplacer) -> i32 {
        let report = self.run();
        match &report.outcome {
            RunOutcome::Completed => 0,
            RunOutcome::Aborted(e) => e.exit_code(),
            RunOutcome::ReExecRequested(inv) => {
                self.audit.log(
                    Level::Info,
                    "Restarting in a new session so the group membership takes effect",
                );
                let err = replacer.replace(inv);
                self.audit
                    .log(Level::Error, &format!("could not restart ({inv}): {err}"));
                EXIT_FAILURE
            }
        }
    }
}
