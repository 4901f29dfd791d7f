// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lamq queue:work`: process the one SQS message handed to this invocation.

use anyhow::Result;
use clap::Args;
use lamq_adapters::{MaintenanceMode, SqsClient};
use lamq_core::{JobEnvelope, SystemClock, WorkerOptions};
use lamq_engine::{RunOutcome, SqsJob, Worker};

use crate::config::{Config, SqsConnection};
use crate::env;
use crate::exit_error::ExitError;

pub const CONNECTION_NOT_STRING: &str = r#"The "--connection" option must be a string"#;
pub const MESSAGE_REQUIRED: &str = r#"The "--message" option is required"#;
pub const UNRESOLVED_QUEUE_URL: &str = "Unable to resolve queue URL";

#[derive(Args, Debug, Clone)]
pub struct WorkArgs {
    /// The name of the queue connection
    #[arg(long, default_value = "sqs")]
    pub connection: String,
    /// The base64 encoded SQS message record
    #[arg(long)]
    pub message: Option<String>,
    /// Seconds to delay failed jobs
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub delay: i64,
    /// Seconds a job may run
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub timeout: i64,
    /// Attempts before a job is logged as failed
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub tries: i64,
    /// Run even in maintenance mode
    #[arg(long)]
    pub force: bool,
}

impl WorkArgs {
    pub fn options(&self) -> WorkerOptions {
        WorkerOptions::from_args(self.delay, self.timeout, self.tries, self.force)
    }
}

/// A validated invocation, ready to run.
#[derive(Debug)]
pub struct WorkPlan {
    pub envelope: JobEnvelope,
    pub connection: SqsConnection,
    pub options: WorkerOptions,
}

#[derive(Debug)]
pub enum Prepared {
    /// Down for maintenance; nothing to do
    Skip,
    Run(Box<WorkPlan>),
}

/// Validate the invocation without touching the message.
///
/// Every failure carries the operator-facing message and exit status 1.
pub fn prepare(
    args: &WorkArgs,
    config: &Config,
    maintenance: &impl MaintenanceMode,
) -> Result<Prepared, ExitError> {
    if maintenance.is_down() && !args.force {
        return Ok(Prepared::Skip);
    }

    if args.connection.trim().is_empty() {
        return Err(ExitError::failure(CONNECTION_NOT_STRING));
    }
    let encoded = args
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ExitError::failure(MESSAGE_REQUIRED))?;

    let record = lamq_wire::decode(encoded).map_err(ExitError::failure)?;
    let connection = config.sqs_connection(&args.connection).map_err(ExitError::failure)?;
    let queue_url = record
        .queue_url()
        .and_then(|url| connection.resolver(config.overrides.clone()).resolve(Some(&url)).ok())
        .ok_or_else(|| ExitError::failure(UNRESOLVED_QUEUE_URL))?;

    let envelope = JobEnvelope::new(record.normalize(), queue_url, args.connection.clone());
    Ok(Prepared::Run(Box::new(WorkPlan {
        envelope,
        connection: connection.clone(),
        options: args.options(),
    })))
}

/// Exit status for a finished run.
pub fn exit_for(outcome: RunOutcome) -> Result<(), ExitError> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(ExitError::failure(format!("Job {outcome}")))
    }
}

pub async fn handle(args: WorkArgs, config: &Config) -> Result<()> {
    let maintenance = config.maintenance(env::maintenance_forced());
    let plan = match prepare(&args, config, &maintenance)? {
        Prepared::Skip => {
            tracing::info!("application is down for maintenance, skipping job");
            return Ok(());
        }
        Prepared::Run(plan) => *plan,
    };

    let client = SqsClient::connect(&plan.connection.client_config()).await;
    let job = SqsJob::new(plan.envelope, client);
    let worker = Worker::new(config.handler(), config.failed_jobs(), SystemClock);

    let outcome = worker.run_sqs_job(job, plan.options).await.map_err(ExitError::failure)?;
    exit_for(outcome)?;
    Ok(())
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
