// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::envelope::{JobEnvelope, SqsMessage};
use serde_json::{Map, Value};

pub const TEST_QUEUE: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/test-queue";
pub const TEST_FIFO_QUEUE: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/test-queue.fifo";

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use proptest::prelude::*;
    use serde_json::Value;

    /// Any JSON scalar that might show up as an attempt counter.
    pub fn arb_counter() -> impl Strategy<Value = Value> {
        prop_oneof![
            (0i64..10_000).prop_map(Value::from),
            (0i64..10_000).prop_map(|n| Value::String(n.to_string())),
            "[a-z]{0,6}".prop_map(Value::String),
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
        ]
    }
}

// ── Envelope factories ──────────────────────────────────────────────────

/// Message with a receipt handle, the given body and string attributes.
pub fn message(body: &str, attributes: &[(&str, Value)]) -> SqsMessage {
    let attributes: Map<String, Value> =
        attributes.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    SqsMessage {
        message_id: Some("message-id".to_string()),
        receipt_handle: Some("test-handle".to_string()),
        body: Some(body.to_string()),
        attributes: Some(Value::Object(attributes)),
        message_attributes: Some(Value::Object(Map::new())),
    }
}

/// Envelope on `queue` whose body is `payload` serialized.
pub fn envelope(payload: Value, queue: &str, attributes: &[(&str, Value)]) -> JobEnvelope {
    JobEnvelope::new(message(&payload.to_string(), attributes), queue, "sqs")
}
