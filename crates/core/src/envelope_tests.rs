// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{envelope, message, strategies, TEST_FIFO_QUEUE, TEST_QUEUE};
use proptest::prelude::*;
use serde_json::json;

#[yare::parameterized(
    both_numeric          = { json!({"attempts": 2}),     Some(json!(3)),     5 },
    string_receive_count  = { json!({"attempts": 2}),     Some(json!("3")),   5 },
    body_not_numeric      = { json!({"attempts": "foo"}), Some(json!(3)),     3 },
    receive_not_numeric   = { json!({"attempts": 2}),     Some(json!("foo")), 3 },
    neither_present       = { json!({}),                  None,               1 },
    first_delivery        = { json!({"attempts": 0}),     Some(json!("1")),   1 },
    zero_receive_count    = { json!({}),                  Some(json!(0)),     1 },
    negative_body         = { json!({"attempts": -9}),    Some(json!(1)),     1 },
)]
fn attempts_cases(payload: Value, receive_count: Option<Value>, expected: u32) {
    let attrs: Vec<(&str, Value)> = receive_count
        .map(|v| vec![(attributes::APPROXIMATE_RECEIVE_COUNT, v)])
        .unwrap_or_default();
    assert_eq!(envelope(payload, TEST_QUEUE, &attrs).attempts(), expected);
}

#[test]
fn empty_envelope_has_one_attempt() {
    let envelope = JobEnvelope::new(SqsMessage::default(), TEST_QUEUE, "sqs");
    assert_eq!(envelope.attempts(), 1);
    assert_eq!(envelope.body(), "");
    assert!(envelope.delete_request().is_none());
}

#[test]
fn non_object_body_counts_no_payload_attempts() {
    let envelope = JobEnvelope::new(message("[1,2,3]", &[]), TEST_QUEUE, "sqs");
    assert_eq!(envelope.attempts(), 1);
}

proptest! {
    #[test]
    fn attempts_is_never_below_one(body in strategies::arb_counter(), count in strategies::arb_counter()) {
        let envelope = envelope(
            json!({"attempts": body}),
            TEST_QUEUE,
            &[(attributes::APPROXIMATE_RECEIVE_COUNT, count)],
        );
        prop_assert!(envelope.attempts() >= 1);
    }

    #[test]
    fn attempts_sums_numeric_inputs(body in 0u32..100_000, count in 1u32..100_000) {
        let envelope = envelope(
            json!({"attempts": body}),
            TEST_QUEUE,
            &[(attributes::APPROXIMATE_RECEIVE_COUNT, json!(count.to_string()))],
        );
        prop_assert_eq!(envelope.attempts(), body + count);
    }
}

#[test]
fn delete_request_targets_the_delivery() {
    let envelope = envelope(json!({}), TEST_QUEUE, &[]);
    assert_eq!(
        envelope.delete_request(),
        Some(DeleteMessage {
            queue_url: TEST_QUEUE.to_string(),
            receipt_handle: "test-handle".to_string(),
        })
    );
}

#[test]
fn standard_release_carries_delay_and_attempts() {
    let envelope = envelope(
        json!({"attempts": 2, "job": "send-email"}),
        TEST_QUEUE,
        &[(attributes::APPROXIMATE_RECEIVE_COUNT, json!("3"))],
    );
    let send = envelope.release_request(60);

    assert_eq!(send.queue_url, TEST_QUEUE);
    assert_eq!(send.delay_seconds, Some(60));
    assert_eq!(send.message_group_id, None);
    assert_eq!(send.message_deduplication_id, None);
    let body: Value = serde_json::from_str(&send.message_body).unwrap();
    assert_eq!(body, json!({"attempts": 5, "job": "send-email"}));
}

#[yare::parameterized(
    positive = { 60, 60 },
    zero     = { 0,  0 },
    past_due = { -30, 0 },
)]
fn release_delay_cases(delay: i64, expected: u32) {
    let send = envelope(json!({}), TEST_QUEUE, &[]).release_request(delay);
    assert_eq!(send.delay_seconds, Some(expected));
}

#[test]
fn fifo_release_drops_delay_and_derives_dedup_id() {
    let envelope = envelope(
        json!({"foo": "bar"}),
        TEST_FIFO_QUEUE,
        &[
            (attributes::MESSAGE_GROUP_ID, json!("group-id")),
            (attributes::MESSAGE_DEDUPLICATION_ID, json!("dedup-id")),
        ],
    );
    assert!(envelope.is_fifo());

    let send = envelope.release_request(60);
    assert_eq!(send.queue_url, TEST_FIFO_QUEUE);
    assert_eq!(send.delay_seconds, None);
    assert_eq!(send.message_group_id.as_deref(), Some("group-id"));
    assert_eq!(send.message_deduplication_id.as_deref(), Some("dedup-id-1"));
}

#[test]
fn fifo_dedup_id_uses_effective_attempts() {
    let envelope = envelope(
        json!({"attempts": 3}),
        TEST_FIFO_QUEUE,
        &[
            (attributes::APPROXIMATE_RECEIVE_COUNT, json!("2")),
            (attributes::MESSAGE_GROUP_ID, json!("g")),
            (attributes::MESSAGE_DEDUPLICATION_ID, json!("d")),
        ],
    );
    let send = envelope.release_request(0);
    assert_eq!(send.message_deduplication_id.as_deref(), Some("d-5"));
    assert_eq!(JobPayload::parse(&send.message_body).attempts(), 5);
}

#[test]
fn release_of_non_object_body_resends_it_unchanged() {
    let envelope = JobEnvelope::new(message("plain text", &[]), TEST_QUEUE, "sqs");
    assert_eq!(envelope.release_request(5).message_body, "plain text");
}

#[test]
fn message_serializes_with_capitalized_keys() {
    let value = serde_json::to_value(message("{}", &[])).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["Attributes", "Body", "MessageAttributes", "MessageId", "ReceiptHandle"]);
}
