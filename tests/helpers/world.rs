// tests/helpers/world.rs
// Scripted collaborators: a simulated host behind CommandRunner, a queued
// Prompter, a FileOps that can refuse writes, and a recording replacer.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use devstrap::adapters::{CommandRunner, FileOps, ProcessReplacer, Prompter, StdFileOps};
use devstrap::types::{CommandOutput, Error, ErrorKind, Invocation, Result};

use super::testroot::install_exe;

pub const DB_PROBE: &str = "docker-compose run --rm web bin/rails runner ActiveRecord::Base.connection";

/// Host state the fake runner answers from and mutates.
#[derive(Debug, Default)]
pub struct World {
    pub daemon_running: bool,
    /// Groups of the running process, as `id -Gn` reports them.
    pub process_groups: Vec<String>,
    /// Groups added through `usermod`; only visible after a re-exec.
    pub account_groups: Vec<String>,
    pub proxy_running: bool,
    pub database_exists: bool,
    /// Command lines forced to exit with the given code.
    pub exit_codes: HashMap<String, i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Probe,
    Run,
}

#[derive(Clone)]
pub struct FakeRunner {
    bin: PathBuf,
    world: Arc<Mutex<World>>,
    calls: Arc<Mutex<Vec<(Mode, String)>>>,
}

impl FakeRunner {
    pub fn new(bin: PathBuf) -> Self {
        Self {
            bin,
            world: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut World)) {
        f(&mut self.world.lock().unwrap());
    }

    pub fn fail(&self, command_line: &str, code: i32) {
        self.update(|w| {
            w.exit_codes.insert(command_line.to_string(), code);
        });
    }

    /// Simulate the fresh login session a re-exec produces.
    pub fn new_session(&self) {
        self.update(|w| {
            let added = std::mem::take(&mut w.account_groups);
            w.process_groups.extend(added);
        });
    }

    /// Command lines executed as actions, in order.
    pub fn runs(&self) -> Vec<String> {
        self.calls_in(Mode::Run)
    }

    pub fn probes(&self) -> Vec<String> {
        self.calls_in(Mode::Probe)
    }

    pub fn all(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn calls_in(&self, mode: Mode) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == mode)
            .map(|(_, c)| c.clone())
            .collect()
    }

    fn answer(&self, mode: Mode, inv: &Invocation) -> CommandOutput {
        let line = inv.command_line();
        self.calls.lock().unwrap().push((mode, line.clone()));
        let mut w = self.world.lock().unwrap();
        if let Some(code) = w.exit_codes.get(&line) {
            return CommandOutput::with_code(*code);
        }
        let mut out = CommandOutput::with_code(0);
        match line.as_str() {
            "service docker status" => {
                if !w.daemon_running {
                    out = CommandOutput::with_code(3);
                }
            }
            "sudo service docker start" => w.daemon_running = true,
            "id -Gn" => out.stdout = format!("{}\n", w.process_groups.join(" ")),
            "dory status" => {
                out.stdout = if w.proxy_running {
                    "[*] Dory is running\n".to_string()
                } else {
                    "[*] dnsmasq: not running\n[*] nginx-proxy: not running\n".to_string()
                };
            }
            "dory up" => w.proxy_running = true,
            DB_PROBE => {
                if !w.database_exists {
                    out = CommandOutput::with_code(1);
                }
            }
            l if l.ends_with("bin/rails db:create") => w.database_exists = true,
            l if l.ends_with("bin/rails db:drop") => w.database_exists = false,
            l if l.starts_with("sudo usermod -aG ") => {
                if let Some(group) = inv.args.get(2) {
                    w.account_groups.push(group.to_string_lossy().into_owned());
                }
            }
            l if l.starts_with("sudo apt-get install -y ") || l.starts_with("brew install ") => {
                let skip = if inv.program == "sudo" { 3 } else { 1 };
                for pkg in inv.args.iter().skip(skip) {
                    install_exe(&self.bin, command_for_package(&pkg.to_string_lossy()));
                }
            }
            l if l.starts_with("sudo gem install ") => {
                if let Some(gem) = inv.args.last() {
                    install_exe(&self.bin, &gem.to_string_lossy());
                }
            }
            _ => {}
        }
        out
    }
}

fn command_for_package(pkg: &str) -> &str {
    match pkg {
        "docker.io" => "docker",
        other => other,
    }
}

impl CommandRunner for FakeRunner {
    fn probe(&self, inv: &Invocation) -> Result<CommandOutput> {
        Ok(self.answer(Mode::Probe, inv))
    }

    fn run(&self, inv: &Invocation) -> Result<CommandOutput> {
        Ok(self.answer(Mode::Run, inv))
    }
}

/// Answers prompts from a queue; an exhausted queue is end of input.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn answer(&self, line: &str) -> &Self {
        self.answers.lock().unwrap().push_back(line.to_string());
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answers.lock().unwrap().pop_front())
    }
}

/// Real filesystem operations, except `touch` on chosen paths is refused
/// with a permission error a fixed number of times.
#[derive(Clone, Default)]
pub struct FlakyFs {
    deny: Arc<Mutex<HashMap<PathBuf, usize>>>,
    pub copies: Arc<Mutex<Vec<PathBuf>>>,
    pub touches: Arc<Mutex<Vec<PathBuf>>>,
}

impl FlakyFs {
    pub fn deny_touch(&self, path: impl Into<PathBuf>, times: usize) {
        self.deny.lock().unwrap().insert(path.into(), times);
    }

    pub fn copy_count(&self) -> usize {
        self.copies.lock().unwrap().len()
    }
}

impl FileOps for FlakyFs {
    fn exists(&self, path: &Path) -> bool {
        StdFileOps.exists(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        self.copies.lock().unwrap().push(to.to_path_buf());
        StdFileOps.copy(from, to)
    }

    fn touch(&self, path: &Path) -> Result<()> {
        self.touches.lock().unwrap().push(path.to_path_buf());
        if let Some(left) = self.deny.lock().unwrap().get_mut(path) {
            if *left > 0 {
                *left -= 1;
                return Err(Error::new(ErrorKind::Permission, "Permission denied (os error 13)"));
            }
        }
        StdFileOps.touch(path)
    }
}

#[derive(Default)]
pub struct RecordingReplacer {
    pub replaced: Mutex<Vec<Invocation>>,
}

impl ProcessReplacer for RecordingReplacer {
    fn replace(&self, inv: &Invocation) -> Error {
        self.replaced.lock().unwrap().push(inv.clone());
        Error::new(ErrorKind::Spawn, "replacement recorded")
    }
}
