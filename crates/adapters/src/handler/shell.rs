// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job handler that runs a configured shell command per job name.
//!
//! The job's `data` is written to the command's stdin as JSON; job metadata
//! and scoped values are exported as `LAMQ_*` environment variables.

use super::{HandlerOutcome, JobContext, JobError, JobHandler};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Exit status a command uses to ask for its message to be released.
pub const EXIT_RELEASE: i32 = 75;

/// Bytes of stderr kept in a failure message.
const STDERR_TAIL: usize = 2000;

/// A command bound to one job name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShellCommand {
    pub command: String,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Run once with `LAMQ_ERROR` set when the job fails permanently
    #[serde(default)]
    pub on_failed: Option<String>,
}

impl ShellCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellJobHandler {
    commands: HashMap<String, ShellCommand>,
}

impl ShellJobHandler {
    pub fn new(commands: HashMap<String, ShellCommand>) -> Self {
        Self { commands }
    }

    pub fn with(mut self, job: impl Into<String>, command: ShellCommand) -> Self {
        self.commands.insert(job.into(), command);
        self
    }

    fn lookup(&self, ctx: &JobContext) -> Result<&ShellCommand, JobError> {
        let job = ctx.job.as_deref().ok_or(JobError::MissingJobName)?;
        self.commands.get(job).ok_or_else(|| JobError::UnknownJob(job.to_string()))
    }
}

fn build(script: &str, entry: &ShellCommand, ctx: &JobContext) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(script)
        .env("LAMQ_JOB", ctx.job.as_deref().unwrap_or_default())
        .env("LAMQ_JOB_NAME", &ctx.display_name)
        .env("LAMQ_JOB_ID", ctx.uuid.as_deref().unwrap_or_default())
        .env("LAMQ_ATTEMPTS", ctx.attempts.to_string())
        .env("LAMQ_MESSAGE_ID", ctx.message_id.as_deref().unwrap_or_default())
        .env("LAMQ_QUEUE", &ctx.queue)
        .env("LAMQ_CONNECTION", &ctx.connection)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for (key, value) in ctx.scope.snapshot() {
        cmd.env(format!("LAMQ_SCOPE_{}", key.to_uppercase()), value);
    }
    cmd.envs(&entry.env);
    if let Some(cwd) = &entry.cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

/// Run `cmd` to completion, feeding `input` on stdin.
async fn run(mut cmd: Command, input: &[u8]) -> Result<std::process::Output, JobError> {
    let mut child = cmd.spawn()?;
    let stdin = child.stdin.take();
    // Feed stdin while stdout and stderr drain; stdin closes when the feed ends
    let feed = async move {
        let Some(mut stdin) = stdin else {
            return Ok(());
        };
        // Commands that ignore stdin may close it early
        match stdin.write_all(input).await {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
            _ => Ok(()),
        }
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output?;
    fed?;
    Ok(output)
}

fn tail(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    let start = text.len().saturating_sub(STDERR_TAIL);
    let start = (start..text.len()).find(|i| text.is_char_boundary(*i)).unwrap_or(text.len());
    text[start..].to_string()
}

#[async_trait]
impl JobHandler for ShellJobHandler {
    async fn handle(&self, ctx: JobContext) -> Result<HandlerOutcome, JobError> {
        let entry = self.lookup(&ctx)?;
        let input = serde_json::to_vec(&ctx.data()).unwrap_or_default();
        let cmd = build(&entry.command, entry, &ctx);

        tracing::debug!(job = %ctx.display_name, command = %entry.command, "running job command");
        let output = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return Err(JobError::Cancelled),
            output = run(cmd, &input) => output?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!(job = %ctx.display_name, "{}", line);
        }

        match output.status.code() {
            Some(0) => Ok(HandlerOutcome::Complete),
            Some(EXIT_RELEASE) => Ok(HandlerOutcome::Release { delay: None }),
            code => Err(JobError::CommandFailed { code, stderr: tail(&output.stderr) }),
        }
    }

    async fn failed(&self, ctx: JobContext, error: &str) {
        let Ok(entry) = self.lookup(&ctx) else {
            return;
        };
        let Some(script) = &entry.on_failed else {
            return;
        };

        let mut cmd = build(script, entry, &ctx);
        cmd.env("LAMQ_ERROR", error);
        let input = serde_json::to_vec(&ctx.data()).unwrap_or_default();
        match run(cmd, &input).await {
            Ok(output) if output.status.success() => {
                tracing::debug!(job = %ctx.display_name, "on_failed command finished");
            }
            Ok(output) => tracing::warn!(
                job = %ctx.display_name,
                code = ?output.status.code(),
                stderr = %tail(&output.stderr),
                "on_failed command exited non-zero"
            ),
            Err(e) => tracing::warn!(job = %ctx.display_name, error = %e, "on_failed command failed"),
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
