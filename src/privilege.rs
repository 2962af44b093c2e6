//! Group membership escalation.
//!
//! Adding a user to a group does not change the groups of processes that are
//! already running. When the group had to be added, the escalator hands back
//! the invocation that restarts the whole program in a fresh session; the
//! top-level driver replaces the process with it. The restarted run begins at
//! step one and its guards skip everything that is already done.
use crate::adapters::CommandRunner;
use crate::api::errors::ApiError;
use crate::constants::POST_ESCALATION_ENV;
use crate::preflight::PresenceChecker;
use crate::types::{Capability, Context, Invocation};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EscalationOutcome {
    AlreadyMember,
    /// Group added; the run must end and be restarted with this invocation.
    AddedAndReexeced(Invocation),
}

pub struct PrivilegeEscalator<'a> {
    ctx: &'a Context,
    runner: &'a dyn CommandRunner,
    checker: &'a PresenceChecker<'a>,
}

impl<'a> PrivilegeEscalator<'a> {
    pub fn new(
        ctx: &'a Context,
        runner: &'a dyn CommandRunner,
        checker: &'a PresenceChecker<'a>,
    ) -> Self {
        Self {
            ctx,
            runner,
            checker,
        }
    }

    pub fn ensure_group_membership(
        &self,
        user: &str,
        group: &str,
    ) -> Result<EscalationOutcome, ApiError> {
        if self
            .checker
            .is_present(&Capability::GroupMember(group.to_string()))
        {
            return Ok(EscalationOutcome::AlreadyMember);
        }
        // A restarted run that still lacks the group would re-exec forever.
        if self.ctx.post_escalation() {
            return Err(ApiError::EscalationFailed(format!(
                "'{user}' is still not in group '{group}' after re-exec; log out and back in, then re-run"
            )));
        }
        let add = Invocation::new("usermod")
            .args(["-aG", group, user])
            .sudo();
        // The membership may already be effective by the time this runs; failure is tolerated.
        match self.runner.run(&add) {
            Ok(out) if out.success() => {}
            Ok(out) => log::warn!("{add} exited with {:?}; continuing", out.code),
            Err(e) => log::warn!("{add} could not run: {e}; continuing"),
        }
        Ok(EscalationOutcome::AddedAndReexeced(reexec_invocation(
            self.ctx, user,
        )))
    }
}

/// `sudo -u <user> -- env <marker>=1 <program> <args...>`
///
/// `sudo -u` initialises the supplementary groups from the account database,
/// so the new session carries the freshly added group.
#[must_use]
pub fn reexec_invocation(ctx: &Context, user: &str) -> Invocation {
    Invocation::new("sudo")
        .args(["-u", user, "--", "env"])
        .arg(format!("{POST_ESCALATION_ENV}=1"))
        .arg(ctx.program())
        .args(ctx.args().iter().cloned())
}
