//! Presence checks: side-effect-free answers to "is capability X already
//! available?".
//!
//! Every check degrades to `false` when it cannot decide. That biases the
//! run toward re-attempting setup, which the actions tolerate.

pub mod checks;

use crate::adapters::{CommandRunner, FileOps};
use crate::policy::Policy;
use crate::types::{Capability, Context, Guard, Requirement};

pub struct PresenceChecker<'a> {
    ctx: &'a Context,
    policy: &'a Policy,
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileOps,
}

impl<'a> PresenceChecker<'a> {
    pub fn new(
        ctx: &'a Context,
        policy: &'a Policy,
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FileOps,
    ) -> Self {
        Self {
            ctx,
            policy,
            runner,
            fs,
        }
    }

    #[must_use]
    pub fn is_present(&self, cap: &Capability) -> bool {
        let present = match cap {
            Capability::CommandOnPath(bin) => {
                checks::which_on_path(bin, self.ctx.search_path().map(|p| p.as_os_str())).is_some()
            }
            Capability::DaemonRunning(service) => checks::daemon_running(self.runner, service),
            Capability::GroupMember(group) => checks::in_group(self.runner, group),
            Capability::Root => self.ctx.is_root(),
            Capability::ProxyRunning => checks::proxy_running(
                self.runner,
                &self.policy.proxy.program,
                &self.policy.proxy.not_running,
            ),
            Capability::DatabaseReachable => {
                checks::database_reachable(self.runner, &database_probe(self.policy))
            }
            Capability::FileExists(rel) => self.fs.exists(&self.ctx.resolve(rel)),
        };
        log::debug!("capability {cap:?}: {present}");
        present
    }

    /// Whether a step's guard holds, i.e. the step is already satisfied.
    #[must_use]
    pub fn satisfied(&self, guard: &Guard) -> bool {
        match guard {
            Guard::Never => false,
            Guard::Present(c) => self.is_present(c),
            Guard::Absent(c) => !self.is_present(c),
            Guard::All(cs) => cs.iter().all(|c| self.is_present(c)),
            Guard::Any(cs) => cs.iter().any(|c| self.is_present(c)),
        }
    }

    /// Requirements whose command is not on the search path, in declaration order.
    #[must_use]
    pub fn missing<'r>(&self, reqs: &'r [Requirement]) -> Vec<&'r Requirement> {
        reqs.iter()
            .filter(|r| !self.is_present(&Capability::CommandOnPath(r.command.clone())))
            .collect()
    }
}

/// Read-only connection probe run inside the application container.
#[must_use]
pub fn database_probe(policy: &Policy) -> crate::types::Invocation {
    policy
        .compose
        .run(["bin/rails", "runner", "ActiveRecord::Base.connection"])
}
