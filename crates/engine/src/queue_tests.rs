// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lamq_adapters::FakeQueueClient;
use lamq_core::QueueOverrides;
use serde_json::{json, Value};
use yare::parameterized;

const PREFIX: &str = "https://sqs.us-east-1.amazonaws.com/123456789012";

fn queue(client: &FakeQueueClient) -> SqsQueue<FakeQueueClient> {
    let resolver = QueueEndpointResolver::new("default").prefix(PREFIX).suffix("-staging");
    SqsQueue::new(client.clone(), resolver, "sqs")
}

#[parameterized(
    default_queue = { None, "https://sqs.us-east-1.amazonaws.com/123456789012/default-staging" },
    named = { Some("emails"), "https://sqs.us-east-1.amazonaws.com/123456789012/emails-staging" },
    fifo = { Some("orders.fifo"), "https://sqs.us-east-1.amazonaws.com/123456789012/orders-staging.fifo" },
    url = { Some("https://example.com/q"), "https://example.com/q" },
)]
fn endpoint_resolves(name: Option<&str>, expected: &str) {
    let client = FakeQueueClient::new();
    assert_eq!(queue(&client).endpoint(name).unwrap(), expected);
}

#[test]
fn endpoint_uses_overrides() {
    let client = FakeQueueClient::new();
    let overrides = QueueOverrides::new().with("emails", "https://example.com/pinned");
    let resolver = QueueEndpointResolver::new("default").prefix(PREFIX).overrides(overrides);
    let queue = SqsQueue::new(client, resolver, "sqs");

    assert_eq!(queue.endpoint(Some("emails")).unwrap(), "https://example.com/pinned");
}

#[tokio::test]
async fn push_sends_payload_with_zero_attempts() {
    let client = FakeQueueClient::new();
    let payload = JobPayload::new("report").with_data(json!({"id": 1}));

    let id = queue(&client).push(&payload, Some("emails"), 30).await.unwrap();

    assert_eq!(id.as_deref(), Some("fake-1"));
    let sends = client.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].queue_url, format!("{PREFIX}/emails-staging"));
    assert_eq!(sends[0].delay_seconds, Some(30));
    let body: Value = serde_json::from_str(&sends[0].message_body).unwrap();
    assert_eq!(body["job"], json!("report"));
    assert_eq!(body["attempts"], json!(0));
    assert_eq!(body["data"], json!({"id": 1}));
}

#[tokio::test]
async fn push_without_delay_leaves_it_unset() {
    let client = FakeQueueClient::new();
    queue(&client).push(&JobPayload::new("report"), None, 0).await.unwrap();
    assert_eq!(client.sends()[0].delay_seconds, None);
}

#[tokio::test]
async fn push_to_fifo_sets_group_and_dedup() {
    let client = FakeQueueClient::new();
    let payload = JobPayload::new("report");

    queue(&client).push(&payload, Some("orders.fifo"), 30).await.unwrap();

    let send = &client.sends()[0];
    assert_eq!(send.delay_seconds, None);
    assert_eq!(send.message_group_id.as_deref(), Some("default"));
    assert_eq!(send.message_deduplication_id.as_deref(), payload.uuid());
}

#[tokio::test]
async fn push_to_unconfigured_queue_fails() {
    let client = FakeQueueClient::new();
    let queue = SqsQueue::new(client.clone(), QueueEndpointResolver::new("default"), "sqs");

    let err = queue.push(&JobPayload::new("report"), Some("emails"), 0).await.unwrap_err();

    assert_eq!(err.to_string(), "Queue [emails] is not configured");
    assert!(client.calls().is_empty());
}
