// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A delivered job and the queue operations it may perform.

use lamq_adapters::{QueueClient, QueueError};
use lamq_core::JobEnvelope;

/// One delivery plus the client used to acknowledge or release it.
///
/// Tracks whether the message was deleted, released or failed so each
/// queue operation happens at most once.
#[derive(Debug)]
pub struct SqsJob<Q> {
    envelope: JobEnvelope,
    client: Q,
    deleted: bool,
    released: bool,
    failed: bool,
}

impl<Q: QueueClient> SqsJob<Q> {
    pub fn new(envelope: JobEnvelope, client: Q) -> Self {
        Self { envelope, client, deleted: false, released: false, failed: false }
    }

    pub fn envelope(&self) -> &JobEnvelope {
        &self.envelope
    }

    pub fn attempts(&self) -> u32 {
        self.envelope.attempts()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn is_deleted_or_released(&self) -> bool {
        self.deleted || self.released
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Acknowledge the delivery. Repeated calls are no-ops.
    pub async fn delete(&mut self) -> Result<(), QueueError> {
        if self.deleted {
            return Ok(());
        }
        let request = self.envelope.delete_request().ok_or(QueueError::MissingReceiptHandle)?;
        self.client.delete_message(&request).await?;
        self.deleted = true;
        Ok(())
    }

    /// Put the job back on its queue with the effective attempt count.
    ///
    /// The current delivery is deleted before the replacement is sent.
    pub async fn release(&mut self, delay: i64) -> Result<Option<String>, QueueError> {
        self.released = true;
        self.delete().await?;
        let request = self.envelope.release_request(delay);
        self.client.send_message(&request).await
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
