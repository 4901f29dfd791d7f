// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publishing side of an SQS connection.

use crate::WorkerError;
use lamq_adapters::QueueClient;
use lamq_core::{seconds_until, EndpointError, JobPayload, QueueEndpointResolver, SendMessage, FIFO_SUFFIX};

/// Message group used for pushes to FIFO queues.
const DEFAULT_MESSAGE_GROUP: &str = "default";

/// An SQS connection: a client plus the resolver for its queue names.
#[derive(Debug, Clone)]
pub struct SqsQueue<Q> {
    client: Q,
    resolver: QueueEndpointResolver,
    connection: String,
}

impl<Q: QueueClient> SqsQueue<Q> {
    pub fn new(client: Q, resolver: QueueEndpointResolver, connection: impl Into<String>) -> Self {
        Self { client, resolver, connection: connection.into() }
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Endpoint URL for `queue`, or for the default queue when `None`.
    pub fn endpoint(&self, queue: Option<&str>) -> Result<String, EndpointError> {
        self.resolver.resolve(queue)
    }

    /// Send a new job, returning the provider's message id.
    ///
    /// Standard queues honor `delay`; FIFO queues go to one message group
    /// deduplicated by the job's uuid.
    pub async fn push(
        &self,
        payload: &JobPayload,
        queue: Option<&str>,
        delay: i64,
    ) -> Result<Option<String>, WorkerError> {
        let endpoint = self.endpoint(queue)?;
        let mut message = SendMessage::new(endpoint.clone(), payload.to_json());
        if endpoint.ends_with(FIFO_SUFFIX) {
            message.message_group_id = Some(DEFAULT_MESSAGE_GROUP.to_string());
            message.message_deduplication_id = payload.uuid().map(str::to_string);
        } else if delay > 0 {
            message.delay_seconds = Some(seconds_until(delay));
        }

        let id = self.client.send_message(&message).await?;
        tracing::info!(
            connection = %self.connection,
            queue = %endpoint,
            job = %payload.display_name(),
            message_id = ?id,
            "pushed job"
        );
        Ok(id)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
