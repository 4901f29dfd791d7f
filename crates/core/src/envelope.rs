// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One delivered SQS message and the queue operations derived from it.
//!
//! `JobEnvelope` is pure data: it computes effective attempts and plans the
//! delete/send pair for a release. Executing those requests against a queue
//! client is the engine's job.

use crate::endpoint::FIFO_SUFFIX;
use crate::payload::{numeric, JobPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute keys recognized on a delivery.
pub mod attributes {
    pub const APPROXIMATE_RECEIVE_COUNT: &str = "ApproximateReceiveCount";
    pub const MESSAGE_GROUP_ID: &str = "MessageGroupId";
    pub const MESSAGE_DEDUPLICATION_ID: &str = "MessageDeduplicationId";
}

/// A delivery in the capitalized vocabulary of the SQS API.
///
/// Fields are optional: absent source fields stay absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqsMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_attributes: Option<Value>,
}

impl SqsMessage {
    /// Attribute value by key, when `Attributes` is an object.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.as_ref()?.get(key)
    }

    /// Attribute rendered as a string (SQS sends every attribute as one).
    pub fn attribute_str(&self, key: &str) -> Option<String> {
        match self.attribute(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Request to acknowledge (delete) one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMessage {
    pub queue_url: String,
    pub receipt_handle: String,
}

/// Request to publish a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessage {
    pub queue_url: String,
    pub message_body: String,
    /// Visibility delay; never set for FIFO queues
    pub delay_seconds: Option<u32>,
    pub message_group_id: Option<String>,
    pub message_deduplication_id: Option<String>,
}

impl SendMessage {
    pub fn new(queue_url: impl Into<String>, message_body: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            message_body: message_body.into(),
            delay_seconds: None,
            message_group_id: None,
            message_deduplication_id: None,
        }
    }
}

/// Seconds until a delay elapses; negative delays are already due.
pub fn seconds_until(delay: i64) -> u32 {
    u32::try_from(delay.max(0)).unwrap_or(u32::MAX)
}

/// One delivery bound to the endpoint and connection it arrived on.
#[derive(Debug, Clone, PartialEq)]
pub struct JobEnvelope {
    message: SqsMessage,
    payload: JobPayload,
    queue: String,
    connection: String,
}

impl JobEnvelope {
    pub fn new(message: SqsMessage, queue: impl Into<String>, connection: impl Into<String>) -> Self {
        let payload = message.body.as_deref().map(JobPayload::parse).unwrap_or_default();
        Self { message, payload, queue: queue.into(), connection: connection.into() }
    }

    pub fn message(&self) -> &SqsMessage {
        &self.message
    }

    pub fn payload(&self) -> &JobPayload {
        &self.payload
    }

    /// Resolved endpoint URL this delivery belongs to.
    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    pub fn message_id(&self) -> Option<&str> {
        self.message.message_id.as_deref()
    }

    pub fn receipt_handle(&self) -> Option<&str> {
        self.message.receipt_handle.as_deref()
    }

    pub fn body(&self) -> &str {
        self.message.body.as_deref().unwrap_or_default()
    }

    pub fn is_fifo(&self) -> bool {
        self.queue.ends_with(FIFO_SUFFIX)
    }

    /// Provider redelivery count, 1 when absent or non-numeric.
    pub fn receive_count(&self) -> i64 {
        self.message.attribute(attributes::APPROXIMATE_RECEIVE_COUNT).and_then(numeric).unwrap_or(1)
    }

    /// Effective attempts: payload attempts plus provider receive count.
    ///
    /// Never below 1.
    pub fn attempts(&self) -> u32 {
        let total = self.payload.attempts().saturating_add(self.receive_count()).max(1);
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Delete request for this delivery, `None` without a receipt handle.
    pub fn delete_request(&self) -> Option<DeleteMessage> {
        Some(DeleteMessage {
            queue_url: self.queue.clone(),
            receipt_handle: self.receipt_handle()?.to_string(),
        })
    }

    /// Replacement message for a release with `delay` seconds.
    ///
    /// The body carries the effective attempt count forward because the
    /// provider's receive count restarts once the original is deleted.
    pub fn release_request(&self, delay: i64) -> SendMessage {
        let attempts = self.attempts();
        let body = match self.message.body.as_deref().and_then(JobPayload::try_parse) {
            Some(payload) => payload.with_attempts(attempts).to_json(),
            None => self.body().to_string(),
        };

        let mut message = SendMessage::new(self.queue.clone(), body);
        if self.is_fifo() {
            let dedup = self
                .message
                .attribute_str(attributes::MESSAGE_DEDUPLICATION_ID)
                .unwrap_or_default();
            message.message_group_id = self.message.attribute_str(attributes::MESSAGE_GROUP_ID);
            message.message_deduplication_id = Some(format!("{dedup}-{attempts}"));
        } else {
            message.delay_seconds = Some(seconds_until(delay));
        }
        message
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
