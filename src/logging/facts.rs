use log::Level;
use serde_json::Value;

/// Structured event stream. One call per fact.
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Human-facing progress and diagnostics.
pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

#[derive(Default)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for JsonlSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Terminal sink used by the binary: progress lines on stdout, warnings and
/// errors on stderr. Every line is also forwarded to the `log` facade under
/// the [`CONSOLE_TARGET`] target.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

/// `log` target of lines already printed by [`ConsoleSink`].
pub const CONSOLE_TARGET: &str = "devstrap::console";

impl AuditSink for ConsoleSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: CONSOLE_TARGET, level, "{msg}");
        match level {
            Level::Error => eprintln!("error: {msg}"),
            Level::Warn => eprintln!("warning: {msg}"),
            Level::Info => println!("==> {msg}"),
            Level::Debug | Level::Trace => {}
        }
    }
}
