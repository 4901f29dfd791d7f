// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-job worker.
//!
//! Runs exactly one delivered job: the handler runs on its own task under
//! the job's deadline, and the result decides whether the message is
//! acknowledged, released or failed.

use crate::{SqsJob, WorkerError};
use lamq_adapters::{FailedJobProvider, HandlerOutcome, JobContext, JobError, JobHandler, QueueClient};
use lamq_core::{Clock, FailedJob, Scope, WorkerOptions};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Error recorded for jobs that ran out of attempts.
pub const MAX_ATTEMPTS_EXCEEDED: &str = "max attempts exceeded";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Handler returned and the message was deleted
    Completed,
    /// Message was put back for another attempt
    Released,
    /// Job failed permanently
    Failed,
    /// Deadline passed before the handler returned
    TimedOut,
}

lamq_core::simple_display! {
    RunOutcome {
        Completed => "completed",
        Released => "released",
        Failed => "failed",
        TimedOut => "timed out",
    }
}

impl RunOutcome {
    /// True when the invocation should report success.
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Completed | RunOutcome::Released)
    }
}

/// Processes one job per call with a shared handler.
pub struct Worker<H, F, C: Clock> {
    handler: Arc<H>,
    failed_jobs: F,
    clock: C,
    scope: Scope,
}

impl<H, F, C> Worker<H, F, C>
where
    H: JobHandler,
    F: FailedJobProvider,
    C: Clock,
{
    pub fn new(handler: H, failed_jobs: F, clock: C) -> Self {
        Self { handler: Arc::new(handler), failed_jobs, clock, scope: Scope::new() }
    }

    /// Request-scoped state handed to every job.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Run one job to a final outcome.
    ///
    /// Queue and failed-job storage errors propagate; handler errors are
    /// turned into a release or a permanent failure.
    pub async fn run_sqs_job<Q: QueueClient>(
        &self,
        mut job: SqsJob<Q>,
        options: WorkerOptions,
    ) -> Result<RunOutcome, WorkerError> {
        self.scope.forget();

        let payload = job.envelope().payload().clone();
        let name = payload.display_name().to_string();
        let attempts = job.attempts();
        let max_tries = options.max_tries_for(payload.max_tries());
        tracing::info!(
            job = %name,
            message_id = job.envelope().message_id().unwrap_or_default(),
            queue = %job.envelope().queue(),
            attempts,
            "processing job"
        );

        if max_tries > 0 && attempts > max_tries {
            self.fail(&mut job, MAX_ATTEMPTS_EXCEEDED).await?;
            return Ok(RunOutcome::Failed);
        }

        let cancel = CancellationToken::new();
        let ctx = JobContext::from_envelope(job.envelope(), self.scope.clone(), cancel.clone());
        let handler = Arc::clone(&self.handler);
        let started = Instant::now();
        let mut task = tokio::spawn(async move { handler.handle(ctx).await }.in_current_span());

        let joined = match options.deadline(payload.timeout()) {
            None => task.await,
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    cancel.cancel();
                    task.abort();
                    tracing::warn!(job = %name, timeout_secs = limit.as_secs(), "job timed out");
                    if payload.fail_on_timeout() {
                        let error = format!("{name} has timed out after {} seconds", limit.as_secs());
                        self.fail(&mut job, &error).await?;
                    }
                    return Ok(RunOutcome::TimedOut);
                }
            },
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match joined.unwrap_or_else(|e| Err(join_error(e))) {
            Ok(HandlerOutcome::Complete) => {
                if !job.is_deleted_or_released() {
                    job.delete().await?;
                }
                tracing::info!(job = %name, elapsed_ms, "processed job");
                Ok(RunOutcome::Completed)
            }
            Ok(HandlerOutcome::Release { delay }) => {
                let delay = delay.unwrap_or(options.delay);
                job.release(delay).await?;
                tracing::info!(job = %name, delay, elapsed_ms, "released job");
                Ok(RunOutcome::Released)
            }
            Err(error) if max_tries > 0 && attempts >= max_tries => {
                tracing::warn!(job = %name, attempts, max_tries, error = %error, "job failed on its last attempt");
                self.fail(&mut job, &error.to_string()).await?;
                Ok(RunOutcome::Failed)
            }
            Err(error) => {
                job.release(options.delay).await?;
                tracing::warn!(job = %name, attempts, delay = options.delay, error = %error, "released job");
                Ok(RunOutcome::Released)
            }
        }
    }

    /// Fail a job permanently: delete it, tell the handler, record it.
    async fn fail<Q: QueueClient>(&self, job: &mut SqsJob<Q>, error: &str) -> Result<(), WorkerError> {
        job.mark_failed();
        if job.is_deleted() {
            return Ok(());
        }
        job.delete().await?;

        let ctx = JobContext::from_envelope(job.envelope(), self.scope.clone(), CancellationToken::new());
        self.handler.failed(ctx, error).await;

        let record = FailedJob::from_envelope(job.envelope(), error, self.clock.epoch_ms());
        self.failed_jobs.log(&record)?;
        tracing::error!(
            job = %job.envelope().payload().display_name(),
            attempts = job.attempts(),
            error,
            "failed job"
        );
        Ok(())
    }
}

fn join_error(err: JoinError) -> JobError {
    if !err.is_panic() {
        return JobError::Cancelled;
    }
    let panic = err.into_panic();
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    JobError::Panicked(message)
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
