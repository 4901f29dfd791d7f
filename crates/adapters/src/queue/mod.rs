// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue client capability: acknowledge (delete) and publish messages.

mod sqs;

pub use sqs::{SqsClient, SqsClientConfig};

use async_trait::async_trait;
use lamq_core::{DeleteMessage, SendMessage};
use thiserror::Error;

/// Errors from queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("failed to delete message from [{queue}]: {message}")]
    Delete { queue: String, message: String },
    #[error("failed to send message to [{queue}]: {message}")]
    Send { queue: String, message: String },
    #[error("message has no receipt handle")]
    MissingReceiptHandle,
}

/// Client for the message queue service.
///
/// There is no retry here: failures go straight back to the caller.
#[async_trait]
pub trait QueueClient: Clone + Send + Sync + 'static {
    /// Acknowledge one delivery
    async fn delete_message(&self, request: &DeleteMessage) -> Result<(), QueueError>;

    /// Publish a message, returning the provider's message id when known
    async fn send_message(&self, request: &SendMessage) -> Result<Option<String>, QueueError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{QueueClient, QueueError};
    use async_trait::async_trait;
    use lamq_core::{DeleteMessage, SendMessage};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded queue operation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum QueueCall {
        Delete(DeleteMessage),
        Send(SendMessage),
    }

    #[derive(Default)]
    struct FakeQueueState {
        calls: Vec<QueueCall>,
        fail_delete: bool,
        fail_send: bool,
    }

    /// Fake queue client recording every call in order
    #[derive(Clone, Default)]
    pub struct FakeQueueClient {
        inner: Arc<Mutex<FakeQueueState>>,
    }

    impl FakeQueueClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every delete fail
        pub fn fail_deletes(&self) {
            self.inner.lock().fail_delete = true;
        }

        /// Make every send fail
        pub fn fail_sends(&self) {
            self.inner.lock().fail_send = true;
        }

        /// All recorded calls, in order
        pub fn calls(&self) -> Vec<QueueCall> {
            self.inner.lock().calls.clone()
        }

        pub fn deletes(&self) -> Vec<DeleteMessage> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    QueueCall::Delete(d) => Some(d),
                    QueueCall::Send(_) => None,
                })
                .collect()
        }

        pub fn sends(&self) -> Vec<SendMessage> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    QueueCall::Send(s) => Some(s),
                    QueueCall::Delete(_) => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl QueueClient for FakeQueueClient {
        async fn delete_message(&self, request: &DeleteMessage) -> Result<(), QueueError> {
            let mut inner = self.inner.lock();
            inner.calls.push(QueueCall::Delete(request.clone()));
            if inner.fail_delete {
                return Err(QueueError::Delete {
                    queue: request.queue_url.clone(),
                    message: "injected failure".to_string(),
                });
            }
            Ok(())
        }

        async fn send_message(&self, request: &SendMessage) -> Result<Option<String>, QueueError> {
            let mut inner = self.inner.lock();
            inner.calls.push(QueueCall::Send(request.clone()));
            if inner.fail_send {
                return Err(QueueError::Send {
                    queue: request.queue_url.clone(),
                    message: "injected failure".to_string(),
                });
            }
            Ok(Some(format!("fake-{}", inner.calls.len())))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeQueueClient, QueueCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
