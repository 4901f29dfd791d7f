// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lamq queue:push`: publish a new job to an SQS queue.

use anyhow::Result;
use clap::Args;
use lamq_adapters::SqsClient;
use lamq_core::JobPayload;
use lamq_engine::SqsQueue;
use serde_json::{Map, Value};

use crate::config::Config;

#[derive(Args, Debug, Clone)]
pub struct PushArgs {
    /// Job name, as registered under `[jobs]`
    pub job: String,
    /// Job data as a JSON object
    #[arg(long)]
    pub data: Option<String>,
    /// Queue name or URL (default: the connection's queue)
    #[arg(long)]
    pub queue: Option<String>,
    /// Connection name (default: `[queue] default`)
    #[arg(long)]
    pub connection: Option<String>,
    /// Seconds before the job becomes visible
    #[arg(long, default_value_t = 0)]
    pub delay: i64,
    /// Attempts before the job fails permanently
    #[arg(long)]
    pub tries: Option<u32>,
    /// Seconds the job may run
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Fail the job permanently when it times out
    #[arg(long)]
    pub fail_on_timeout: bool,
}

/// Parse `--data`, which must be a JSON object when given.
fn parse_data(data: Option<&str>) -> Result<Value> {
    let Some(text) = data else {
        return Ok(Value::Object(Map::new()));
    };
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Ok(Value::Object(map)),
        Ok(_) => anyhow::bail!("JSON data must be an object"),
        Err(e) => anyhow::bail!("invalid JSON data: {}", e),
    }
}

pub fn build_payload(args: &PushArgs) -> Result<JobPayload> {
    let mut payload = JobPayload::new(args.job.clone())
        .with_data(parse_data(args.data.as_deref())?)
        .with_fail_on_timeout(args.fail_on_timeout);
    if let Some(tries) = args.tries {
        payload = payload.with_max_tries(tries);
    }
    if let Some(timeout) = args.timeout {
        payload = payload.with_timeout(timeout);
    }
    Ok(payload)
}

pub async fn handle(args: PushArgs, config: &Config) -> Result<()> {
    let payload = build_payload(&args)?;
    let name = args.connection.clone().unwrap_or_else(|| config.queue.default.clone());
    let connection = config.sqs_connection(&name)?;

    let resolver = connection.resolver(config.overrides.clone());
    // Resolve before connecting so configuration errors surface first
    let endpoint = resolver.resolve(args.queue.as_deref())?;

    let client = SqsClient::connect(&connection.client_config()).await;
    let queue = SqsQueue::new(client, resolver, name);
    let id = queue.push(&payload, Some(&endpoint), args.delay).await?;

    match id {
        Some(id) => println!("Pushed job '{}' to {} ({})", args.job, endpoint, id),
        None => println!("Pushed job '{}' to {}", args.job, endpoint),
    }
    Ok(())
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
