// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application job handling.
//!
//! A handler runs the body of one job. It may complete, ask for the message
//! to be released, or fail; the worker decides what a failure means for the
//! message.

mod shell;

pub use shell::{ShellCommand, ShellJobHandler, EXIT_RELEASE};

use async_trait::async_trait;
use lamq_core::{JobEnvelope, JobPayload, Scope};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors raised by job handlers
#[derive(Debug, Error)]
pub enum JobError {
    #[error("no handler registered for job [{0}]")]
    UnknownJob(String),
    #[error("job payload has no job name")]
    MissingJobName,
    #[error("command exited with status {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("failed to run command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("job was cancelled")]
    Cancelled,
    #[error("job panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Failed(String),
}

/// What a handler wants done with the message after a normal return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Acknowledge the message
    Complete,
    /// Put the message back; `None` uses the worker's delay
    Release { delay: Option<i64> },
}

/// Everything a handler gets to see about the job it runs.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub job: Option<String>,
    pub display_name: String,
    pub uuid: Option<String>,
    pub payload: JobPayload,
    pub attempts: u32,
    pub message_id: Option<String>,
    pub queue: String,
    pub connection: String,
    /// Request-scoped values, cleared before every job
    pub scope: Scope,
    /// Cancelled when the job's deadline passes
    pub cancel: CancellationToken,
}

impl JobContext {
    pub fn from_envelope(envelope: &JobEnvelope, scope: Scope, cancel: CancellationToken) -> Self {
        let payload = envelope.payload().clone();
        Self {
            job: payload.job().map(str::to_string),
            display_name: payload.display_name().to_string(),
            uuid: payload.uuid().map(str::to_string),
            attempts: envelope.attempts(),
            message_id: envelope.message_id().map(str::to_string),
            queue: envelope.queue().to_string(),
            connection: envelope.connection().to_string(),
            payload,
            scope,
            cancel,
        }
    }

    /// The job's `data`, `null` when absent.
    pub fn data(&self) -> Value {
        self.payload.data().cloned().unwrap_or(Value::Null)
    }
}

/// Runs job bodies for one application.
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, ctx: JobContext) -> Result<HandlerOutcome, JobError>;

    /// Called once when a job fails permanently.
    async fn failed(&self, _ctx: JobContext, _error: &str) {}
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HandlerOutcome, JobContext, JobError, JobHandler};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;

    /// Scripted behaviour for one `handle` call
    #[derive(Debug, Clone)]
    pub enum FakeStep {
        Complete,
        Release(Option<i64>),
        Fail(String),
        /// Sleep without checking the cancellation token, then complete
        Hang(Duration),
        /// Write a scope value, then complete
        SetScope(String, String),
        Panic,
    }

    #[derive(Default)]
    struct FakeHandlerState {
        steps: VecDeque<FakeStep>,
        handled: Vec<JobContext>,
        failed: Vec<(String, String)>,
    }

    /// Fake job handler replaying scripted steps; completes when the
    /// script runs out.
    #[derive(Clone, Default)]
    pub struct FakeJobHandler {
        inner: Arc<Mutex<FakeHandlerState>>,
    }

    impl FakeJobHandler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_steps(steps: impl IntoIterator<Item = FakeStep>) -> Self {
            let handler = Self::new();
            handler.inner.lock().steps.extend(steps);
            handler
        }

        /// Contexts passed to `handle`, in order
        pub fn handled(&self) -> Vec<JobContext> {
            self.inner.lock().handled.clone()
        }

        /// `(display_name, error)` pairs passed to `failed`
        pub fn failed_calls(&self) -> Vec<(String, String)> {
            self.inner.lock().failed.clone()
        }
    }

    #[async_trait]
    impl JobHandler for FakeJobHandler {
        async fn handle(&self, ctx: JobContext) -> Result<HandlerOutcome, JobError> {
            let step = {
                let mut inner = self.inner.lock();
                inner.handled.push(ctx.clone());
                inner.steps.pop_front().unwrap_or(FakeStep::Complete)
            };
            match step {
                FakeStep::Complete => Ok(HandlerOutcome::Complete),
                FakeStep::Release(delay) => Ok(HandlerOutcome::Release { delay }),
                FakeStep::Fail(message) => Err(JobError::Failed(message)),
                FakeStep::Hang(duration) => {
                    tokio::time::sleep(duration).await;
                    Ok(HandlerOutcome::Complete)
                }
                FakeStep::SetScope(key, value) => {
                    ctx.scope.insert(key, value);
                    Ok(HandlerOutcome::Complete)
                }
                #[allow(clippy::panic)]
                FakeStep::Panic => panic!("scripted panic"),
            }
        }

        async fn failed(&self, ctx: JobContext, error: &str) {
            self.inner.lock().failed.push((ctx.display_name, error.to_string()));
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobHandler, FakeStep};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
