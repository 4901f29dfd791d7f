// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lambda SQS event record decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lamq_core::SqsMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::arn::QueueArn;

/// Decoding never says which step failed: bad base64, bad JSON and
/// non-object JSON are the same error to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unable to decode the SQS message")]
    Undecodable,
}

/// One SQS record as delivered by the Lambda event source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
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
    #[serde(rename = "eventSourceARN", default, skip_serializing_if = "Option::is_none")]
    pub event_source_arn: Option<String>,
}

impl EventRecord {
    /// Rename the delivery fields into the SQS API vocabulary.
    ///
    /// Total and lossless: nothing is defaulted, absent stays absent.
    pub fn normalize(&self) -> SqsMessage {
        SqsMessage {
            message_id: self.message_id.clone(),
            receipt_handle: self.receipt_handle.clone(),
            body: self.body.clone(),
            attributes: self.attributes.clone(),
            message_attributes: self.message_attributes.clone(),
        }
    }

    /// Parsed event source, `None` when missing or malformed.
    pub fn source(&self) -> Option<QueueArn> {
        self.event_source_arn.as_deref().and_then(QueueArn::parse)
    }

    /// Queue URL derived from the event source.
    pub fn queue_url(&self) -> Option<String> {
        self.source().map(|arn| arn.queue_url())
    }
}

/// Decode a base64-encoded JSON event record.
///
/// An empty object is rejected along with non-objects.
pub fn decode(encoded: &str) -> Result<EventRecord, DecodeError> {
    let bytes = STANDARD.decode(encoded.trim()).map_err(|_| DecodeError::Undecodable)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(fields)) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields)).map_err(|_| DecodeError::Undecodable)
        }
        _ => Err(DecodeError::Undecodable),
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
