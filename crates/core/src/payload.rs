// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized job payload carried in a message body.
//!
//! The payload is an application-defined JSON object. The bridge only reads
//! a handful of well-known keys and injects `attempts` so the attempt count
//! survives a delete-and-resend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPayload(Map<String, Value>);

impl JobPayload {
    /// Fresh payload for dispatching `job`, starting at zero attempts.
    pub fn new(job: impl Into<String>) -> Self {
        let job = job.into();
        let mut fields = Map::new();
        fields.insert("uuid".into(), Value::String(uuid::Uuid::new_v4().to_string()));
        fields.insert("displayName".into(), Value::String(job.clone()));
        fields.insert("job".into(), Value::String(job));
        fields.insert("maxTries".into(), Value::Null);
        fields.insert("timeout".into(), Value::Null);
        fields.insert("failOnTimeout".into(), Value::Bool(false));
        fields.insert("data".into(), Value::Object(Map::new()));
        fields.insert("attempts".into(), Value::from(0));
        Self(fields)
    }

    /// Parse a message body. Bodies that are not JSON objects yield an
    /// empty payload.
    pub fn parse(body: &str) -> Self {
        Self::try_parse(body).unwrap_or_default()
    }

    /// Parse a message body, `None` unless it is a JSON object.
    pub fn try_parse(body: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.0.insert("data".into(), data);
        self
    }

    pub fn with_max_tries(mut self, tries: u32) -> Self {
        self.0.insert("maxTries".into(), Value::from(tries));
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.0.insert("timeout".into(), Value::from(seconds));
        self
    }

    pub fn with_fail_on_timeout(mut self, fail: bool) -> Self {
        self.0.insert("failOnTimeout".into(), Value::Bool(fail));
        self
    }

    /// Replace the embedded attempt counter.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.0.insert("attempts".into(), Value::from(attempts));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Embedded attempt counter, 0 when absent or non-numeric.
    pub fn attempts(&self) -> i64 {
        self.0.get("attempts").and_then(numeric).unwrap_or(0)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.0.get("uuid").and_then(Value::as_str)
    }

    pub fn job(&self) -> Option<&str> {
        self.0.get("job").and_then(Value::as_str)
    }

    /// Human-readable name, falling back to the job name.
    pub fn display_name(&self) -> &str {
        self.0
            .get("displayName")
            .and_then(Value::as_str)
            .or_else(|| self.job())
            .unwrap_or("unknown")
    }

    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Per-job attempt limit overriding the worker's `--tries`.
    pub fn max_tries(&self) -> Option<u32> {
        let tries = self.0.get("maxTries").and_then(numeric)?;
        u32::try_from(tries).ok()
    }

    /// Per-job deadline in seconds overriding the worker's `--timeout`.
    pub fn timeout(&self) -> Option<u64> {
        let seconds = self.0.get("timeout").and_then(numeric)?;
        Some(seconds.max(0) as u64)
    }

    pub fn fail_on_timeout(&self) -> bool {
        self.0.get("failOnTimeout").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Integer view of a JSON number or numeric string.
///
/// Floats truncate toward zero; non-finite values and anything else are
/// not numeric.
pub(crate) fn numeric(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
