//! Helpers for running the `capconf` binary in an isolated directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Temporary working directory with its own HOME, so no user or project
/// configuration leaks into a run.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_capconf"));
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.path(".config"))
            .env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .env_remove("CAPCONF_LEGACY_MODE")
            .env_remove("CAPCONF_VERBOSITY")
            .env_remove("CAPCONF_NODE_LABELS")
            .env_remove("CAPCONF_KEY_PREFIX")
            .env_remove("CAPCONF_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse every non-empty stdout line as one JSON event.
pub fn events(output: &Output) -> Vec<Value> {
    stdout(output)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l).unwrap_or_else(|e| panic!("not NDJSON ({e}): {l}"))
        })
        .collect()
}

pub fn events_named<'a>(events: &'a [Value], name: &str) -> Vec<&'a Value> {
    events.iter().filter(|e| e["event"] == name).collect()
}

pub fn exit_code(output: &Output) -> Option<i32> {
    output.status.code()
}

pub fn file_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

pub const BALANCED: &str = "\
# two percentage children
yarn.scheduler.capacity.root.queues=prod,dev
yarn.scheduler.capacity.root.capacity=100
yarn.scheduler.capacity.root.prod.capacity=70
yarn.scheduler.capacity.root.dev.capacity=30
yarn.scheduler.capacity.maximum-applications=10000
";

pub const UNBALANCED: &str = "\
yarn.scheduler.capacity.root.queues=prod,dev
yarn.scheduler.capacity.root.prod.capacity=60
yarn.scheduler.capacity.root.dev.capacity=30
";
