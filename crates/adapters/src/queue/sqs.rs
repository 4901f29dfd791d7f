// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Amazon SQS client backed by the AWS SDK.

use super::{QueueClient, QueueError};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::config::Credentials;
use aws_sdk_sqs::error::DisplayErrorContext;
use lamq_core::{DeleteMessage, SendMessage};
use std::time::Duration;

/// Connection settings for one SQS connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqsClientConfig {
    pub region: String,
    /// Custom service endpoint (e.g. a local emulator)
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub token: Option<String>,
    pub http_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for SqsClientConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            endpoint: None,
            key: None,
            secret: None,
            token: None,
            http_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(60),
        }
    }
}

impl SqsClientConfig {
    /// Static credentials, only when both key and secret are non-empty.
    ///
    /// Otherwise the SDK's default provider chain applies.
    pub fn credentials(&self) -> Option<Credentials> {
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        let secret = self.secret.as_deref().filter(|s| !s.is_empty())?;
        let token = self.token.clone().filter(|t| !t.is_empty());
        Some(Credentials::new(key, secret, token, None, "lamq-config"))
    }
}

#[derive(Clone, Debug)]
pub struct SqsClient {
    inner: aws_sdk_sqs::Client,
}

impl SqsClient {
    /// Build a client. Credentials are resolved lazily on first request.
    pub async fn connect(config: &SqsClientConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .connect_timeout(config.connect_timeout)
            .operation_attempt_timeout(config.http_timeout)
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(timeouts);
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let Some(credentials) = config.credentials() {
            loader = loader.credentials_provider(credentials);
        }

        let shared = loader.load().await;
        tracing::debug!(region = %config.region, endpoint = ?config.endpoint, "sqs client ready");
        Self { inner: aws_sdk_sqs::Client::new(&shared) }
    }
}

#[async_trait]
impl QueueClient for SqsClient {
    async fn delete_message(&self, request: &DeleteMessage) -> Result<(), QueueError> {
        self.inner
            .delete_message()
            .queue_url(request.queue_url.clone())
            .receipt_handle(request.receipt_handle.clone())
            .send()
            .await
            .map_err(|e| QueueError::Delete {
                queue: request.queue_url.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }

    async fn send_message(&self, request: &SendMessage) -> Result<Option<String>, QueueError> {
        let delay = request.delay_seconds.map(|d| i32::try_from(d).unwrap_or(i32::MAX));
        let output = self
            .inner
            .send_message()
            .queue_url(request.queue_url.clone())
            .message_body(request.message_body.clone())
            .set_delay_seconds(delay)
            .set_message_group_id(request.message_group_id.clone())
            .set_message_deduplication_id(request.message_deduplication_id.clone())
            .send()
            .await
            .map_err(|e| QueueError::Send {
                queue: request.queue_url.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(output.message_id().map(str::to_string))
    }
}
