use std::process::ExitCode;

use devstrap::adapters::ExecReplacer;
use devstrap::constants::EXIT_FAILURE;
use devstrap::logging::{AuditSink, ConsoleSink, JsonlSink, CONSOLE_TARGET};
use devstrap::policy::Policy;
use devstrap::types::Context;
use devstrap::Bootstrap;
use log::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    let ctx = match Context::detect() {
        Ok(ctx) => ctx,
        Err(e) => {
            ConsoleSink.log(Level::Error, &format!("cannot read the process environment: {e}"));
            return exit(EXIT_FAILURE);
        }
    };
    let api = Bootstrap::new(JsonlSink, ConsoleSink, Policy::default(), ctx);
    exit(api.drive(&ExecReplacer))
}

/// Diagnostics on stderr, filtered by `RUST_LOG` (default `warn`). Lines the
/// console sink already printed stay off unless `RUST_LOG` names them.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives()));
    // Also installs the `log` bridge, so `log::debug!` records reach the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn default_directives() -> String {
    format!("warn,{CONSOLE_TARGET}=off")
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
