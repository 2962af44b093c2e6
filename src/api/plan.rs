use crate::policy::Policy;
use crate::types::{Action, Capability, Context, Guard, Invocation, Plan, Step};

/// Build the fixed step sequence. Ordering matters: the database steps
/// assume images are built and the compose steps assume docker is usable.
pub(super) fn build(ctx: &Context, policy: &Policy) -> Plan {
    let mut steps = Vec::new();

    let requirements = policy.dependencies.for_os(ctx.os()).to_vec();
    steps.push(Step::new(
        "dependencies",
        "Checking dependencies",
        Guard::All(
            requirements
                .iter()
                .map(|r| Capability::CommandOnPath(r.command.clone()))
                .collect(),
        ),
        Action::InstallDependencies { requirements },
    ));

    if ctx.os().is_linux() {
        steps.push(Step::new(
            "docker-daemon",
            "Ensuring the docker daemon is running",
            Guard::Present(Capability::DaemonRunning(policy.docker.service.clone())),
            Action::StartDaemon {
                service: policy.docker.service.clone(),
            },
        ));
        steps.push(Step::new(
            "docker-group",
            format!("Ensuring {} can use docker without sudo", ctx.user()),
            Guard::Any(vec![
                Capability::Root,
                Capability::GroupMember(policy.docker.group.clone()),
            ]),
            Action::JoinGroup {
                group: policy.docker.group.clone(),
            },
        ));
        steps.push(Step::new(
            "dory",
            "Ensuring the dory proxy is up",
            Guard::Present(Capability::ProxyRunning),
            Action::Exec(Invocation::new(&policy.proxy.program).arg("up")),
        ));
    }

    let artifacts = &policy.artifacts;
    steps.push(
        Step::new(
            "override-config",
            format!("Ensuring {} exists", artifacts.override_config.display()),
            Guard::Present(Capability::FileExists(artifacts.override_config.clone())),
            Action::MaterializeConfig {
                path: artifacts.override_config.clone(),
                template: artifacts.override_template.clone(),
            },
        )
        .best_effort(),
    );
    steps.push(Step::new(
        "build",
        "Building containers",
        Guard::Never,
        Action::Exec(Invocation::new(&policy.compose.program).arg("build")),
    ));
    steps.push(
        Step::new(
            "gemfile-lock",
            format!("Ensuring {} is writable", artifacts.lock_file.display()),
            Guard::Never,
            Action::TouchArtifact {
                path: artifacts.lock_file.clone(),
            },
        )
        .with_fallback(artifacts.lock_file.clone()),
    );
    steps.push(Step::new(
        "bundle",
        "Installing gems",
        Guard::Never,
        Action::Exec(policy.compose.run(["bundle", "install"])),
    ));

    steps.push(
        Step::new(
            "database.schema",
            format!("Ensuring {} is writable", artifacts.schema_file.display()),
            Guard::Never,
            Action::TouchArtifact {
                path: artifacts.schema_file.clone(),
            },
        )
        .with_fallback(artifacts.schema_file.clone()),
    );
    steps.push(
        Step::new(
            "database.drop",
            "Checking for an existing database",
            Guard::Absent(Capability::DatabaseReachable),
            Action::Exec(policy.compose.run(["bin/rails", "db:drop"])),
        )
        .destructive(),
    );
    for (name, task, summary) in [
        ("database.create", "db:create", "Creating the database"),
        ("database.migrate", "db:migrate", "Migrating the database"),
        ("database.seed", "db:seed", "Seeding the database"),
    ] {
        steps.push(Step::new(
            name,
            summary,
            Guard::Never,
            Action::Exec(policy.compose.run(["bin/rails", task])),
        ));
    }

    Plan { steps }
}
