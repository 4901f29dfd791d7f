// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue name to endpoint URL resolution.
//!
//! A queue name resolves, in order, to:
//! 1. itself, when it is already an absolute URL
//! 2. the `LAMQ_QUEUE_<NAME>` override captured at startup
//! 3. `prefix/` + name + suffix, keeping a `.fifo` marker last

use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Namespace token for per-queue endpoint overrides.
pub const OVERRIDE_NAMESPACE: &str = "LAMQ_QUEUE_";

/// Name marker for ordered (FIFO) queues.
pub const FIFO_SUFFIX: &str = ".fifo";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("Queue [{0}] is not configured")]
    NotConfigured(String),
}

/// Endpoint overrides keyed by environment variable name.
///
/// Captured once at process start; resolution never reads the
/// process environment itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueOverrides {
    vars: HashMap<String, String>,
}

impl QueueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the variables inside the override namespace.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(OVERRIDE_NAMESPACE))
            .collect();
        Self { vars }
    }

    /// Pin an endpoint for a queue name.
    pub fn with(mut self, queue: &str, endpoint: impl Into<String>) -> Self {
        self.vars.insert(override_key(queue), endpoint.into());
        self
    }

    /// Override for `queue`; empty values count as unset.
    pub fn get(&self, queue: &str) -> Option<&str> {
        self.vars.get(&override_key(queue)).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Environment variable name holding the override for `queue`.
pub fn override_key(queue: &str) -> String {
    format!("{}{}", OVERRIDE_NAMESPACE, queue.to_uppercase().replace('-', "_"))
}

/// True for absolute URLs with a host (`https://sqs.../123/q`).
pub fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate).map(|url| url.has_host()).unwrap_or(false)
}

/// Resolve a queue name to its endpoint URL.
pub fn resolve(
    queue: Option<&str>,
    default: &str,
    prefix: &str,
    suffix: &str,
    overrides: &QueueOverrides,
) -> Result<String, EndpointError> {
    let queue = queue.filter(|q| !q.is_empty()).unwrap_or(default);

    if is_absolute_url(queue) {
        return Ok(queue.to_string());
    }

    let endpoint = match overrides.get(queue) {
        Some(pinned) => pinned.to_string(),
        None => suffix_queue(queue, prefix, suffix),
    };

    if !is_absolute_url(&endpoint) {
        return Err(EndpointError::NotConfigured(queue.to_string()));
    }

    Ok(endpoint)
}

fn suffix_queue(queue: &str, prefix: &str, suffix: &str) -> String {
    let (name, fifo) = match queue.strip_suffix(FIFO_SUFFIX) {
        Some(name) => (name, FIFO_SUFFIX),
        None => (queue, ""),
    };

    let prefix = if prefix.ends_with('/') { prefix.to_string() } else { format!("{prefix}/") };
    let mut endpoint =
        if name.starts_with(&prefix) { name.to_string() } else { format!("{prefix}{name}") };
    if !endpoint.ends_with(suffix) {
        endpoint.push_str(suffix);
    }
    endpoint.push_str(fifo);
    endpoint
}

/// Resolver bound to one connection's default queue and tenancy strings.
#[derive(Debug, Clone, Default)]
pub struct QueueEndpointResolver {
    default: String,
    prefix: String,
    suffix: String,
    overrides: QueueOverrides,
}

impl QueueEndpointResolver {
    pub fn new(default: impl Into<String>) -> Self {
        Self { default: default.into(), ..Self::default() }
    }

    crate::setters! {
        into { prefix: String, suffix: String }
        set { overrides: QueueOverrides }
    }

    pub fn resolve(&self, queue: Option<&str>) -> Result<String, EndpointError> {
        resolve(queue, &self.default, &self.prefix, &self.suffix, &self.overrides)
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
