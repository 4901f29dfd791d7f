// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use crate::config::SqsDefaults;
use lamq_core::QueueOverrides;
use std::path::PathBuf;

const DEFAULT_REGION: &str = "us-east-1";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Config file named by `LAMQ_CONFIG`
pub fn config_path() -> Option<PathBuf> {
    var("LAMQ_CONFIG").map(PathBuf::from)
}

/// Tracing filter directives (`LAMQ_LOG`, default `info`)
pub fn log_filter() -> String {
    var("LAMQ_LOG").unwrap_or_else(|| "info".to_string())
}

/// JSON log lines when `LAMQ_LOG_FORMAT=json`
pub fn log_json() -> bool {
    var("LAMQ_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"))
}

/// `LAMQ_LOG_REQUEST_CONTEXT`, when set, wins over the config file.
pub fn log_request_context() -> Option<bool> {
    var("LAMQ_LOG_REQUEST_CONTEXT").map(|v| truthy(&v))
}

/// Invocation request id exported by the function runtime
pub fn request_id() -> Option<String> {
    var("LAMQ_REQUEST_ID")
}

/// Maintenance mode forced on by `LAMQ_MAINTENANCE`
pub fn maintenance_forced() -> bool {
    var("LAMQ_MAINTENANCE").is_some_and(|v| truthy(&v))
}

/// Settings for the built-in `sqs` connection.
///
/// Region: `AWS_DEFAULT_REGION` > `AWS_REGION` > us-east-1
pub fn sqs_defaults() -> SqsDefaults {
    SqsDefaults {
        region: var("AWS_DEFAULT_REGION")
            .or_else(|| var("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        prefix: var("SQS_PREFIX").unwrap_or_default(),
        suffix: var("SQS_SUFFIX").unwrap_or_default(),
        queue: var("SQS_QUEUE").unwrap_or_else(|| "default".to_string()),
    }
}

/// Every `LAMQ_QUEUE_*` variable, captured once.
pub fn queue_overrides() -> QueueOverrides {
    QueueOverrides::from_vars(std::env::vars())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
