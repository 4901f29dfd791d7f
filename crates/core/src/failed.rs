// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record of a permanently failed job.

use crate::envelope::JobEnvelope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub connection: String,
    pub queue: String,
    pub payload: String,
    pub exception: String,
    pub failed_at_ms: u64,
}

impl FailedJob {
    pub fn from_envelope(envelope: &JobEnvelope, exception: impl Into<String>, failed_at_ms: u64) -> Self {
        Self {
            uuid: envelope.payload().uuid().map(str::to_string),
            connection: envelope.connection().to_string(),
            queue: envelope.queue().to_string(),
            payload: envelope.body().to_string(),
            exception: exception.into(),
            failed_at_ms,
        }
    }
}

#[cfg(test)]
#[path = "failed_tests.rs"]
mod tests;
