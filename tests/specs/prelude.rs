//! Shared helpers for CLI specs.

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tempfile::TempDir;

pub use serde_json::json;

/// Variables that would leak the developer's environment into a test.
const ISOLATED_VARS: &[&str] = &[
    "LAMQ_CONFIG",
    "LAMQ_LOG",
    "LAMQ_LOG_FORMAT",
    "LAMQ_LOG_REQUEST_CONTEXT",
    "LAMQ_MAINTENANCE",
    "LAMQ_REQUEST_ID",
    "SQS_PREFIX",
    "SQS_SUFFIX",
    "SQS_QUEUE",
];

pub const ARN: &str = "arn:aws:sqs:us-east-1:123456789012:test-queue";

/// `lamq` run from a fresh empty directory.
pub fn cli() -> Cli {
    Cli::new(None)
}

/// Base64 Lambda record wrapping `body`.
pub fn record(body: serde_json::Value) -> String {
    record_from(json!({
        "messageId": "message-id",
        "receiptHandle": "receipt-handle",
        "body": body.to_string(),
        "attributes": {"ApproximateReceiveCount": "1"},
        "messageAttributes": {},
        "eventSourceARN": ARN,
    }))
}

pub fn record_from(value: serde_json::Value) -> String {
    STANDARD.encode(value.to_string())
}

/// Temporary project directory holding an optional `lamq.toml`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn config(&self, content: &str) {
        self.file("lamq.toml", content);
    }

    pub fn lamq(&self) -> Cli {
        Cli::new(Some(self.path()))
    }
}

pub struct Cli {
    cmd: Command,
    _scratch: Option<TempDir>,
}

impl Cli {
    fn new(cwd: Option<&Path>) -> Self {
        let mut cmd = Command::cargo_bin("lamq").unwrap();
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        let scratch = match cwd {
            Some(cwd) => {
                cmd.current_dir(cwd);
                None
            }
            None => {
                let dir = TempDir::new().unwrap();
                cmd.current_dir(dir.path());
                Some(dir)
            }
        };
        Self { cmd, _scratch: scratch }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run, expecting exit status 0.
    pub fn passes(self) -> Output {
        self.code(0)
    }

    /// Run, expecting exit status 1.
    pub fn fails(self) -> Output {
        self.code(1)
    }

    pub fn code(mut self, expected: i32) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        assert_eq!(
            output.status.code(),
            Some(expected),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            out.stdout,
            out.stderr
        );
        out
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }
}
