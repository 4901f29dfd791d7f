// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup. Logs go to stderr so stdout stays free for command output.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(filter: &str, json: bool) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Span tagging every event with the invocation's request id.
pub fn invocation_span(request_context: bool, request_id: Option<String>) -> tracing::Span {
    match request_id.filter(|_| request_context) {
        Some(request_id) => tracing::info_span!("invocation", %request_id),
        None => tracing::Span::none(),
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
