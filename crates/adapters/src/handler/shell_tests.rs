// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lamq_core::test_support::{envelope, TEST_QUEUE};
use lamq_core::Scope;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn context(payload: serde_json::Value) -> JobContext {
    let envelope = envelope(payload, TEST_QUEUE, &[("ApproximateReceiveCount", json!("2"))]);
    JobContext::from_envelope(&envelope, Scope::new(), CancellationToken::new())
}

fn handler(job: &str, command: &str) -> ShellJobHandler {
    ShellJobHandler::default().with(job, ShellCommand::new(command))
}

#[tokio::test]
async fn zero_exit_completes() {
    let outcome = handler("report", "exit 0").handle(context(json!({"job": "report"}))).await;
    assert_eq!(outcome.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn release_exit_asks_for_release() {
    let outcome = handler("report", "exit 75").handle(context(json!({"job": "report"}))).await;
    assert_eq!(outcome.unwrap(), HandlerOutcome::Release { delay: None });
}

#[tokio::test]
async fn nonzero_exit_fails_with_stderr() {
    let err = handler("report", "echo boom >&2; exit 3")
        .handle(context(json!({"job": "report"})))
        .await
        .unwrap_err();
    match err {
        JobError::CommandFailed { code, stderr } => {
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_job_is_an_error() {
    let err = handler("report", "exit 0").handle(context(json!({"job": "other"}))).await.unwrap_err();
    assert!(matches!(err, JobError::UnknownJob(ref name) if name == "other"));
}

#[tokio::test]
async fn missing_job_name_is_an_error() {
    let err = handler("report", "exit 0").handle(context(json!({"data": {}}))).await.unwrap_err();
    assert!(matches!(err, JobError::MissingJobName));
}

#[tokio::test]
async fn data_arrives_on_stdin() {
    let cmd = r#"test "$(cat)" = '{"id":7}'"#;
    let outcome = handler("report", cmd)
        .handle(context(json!({"job": "report", "data": {"id": 7}})))
        .await;
    assert_eq!(outcome.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn metadata_is_exported() {
    let cmd = r#"test "$LAMQ_JOB" = report && test "$LAMQ_ATTEMPTS" = 2 && test "$LAMQ_CONNECTION" = sqs && test -n "$LAMQ_QUEUE""#;
    let outcome = handler("report", cmd)
        .handle(context(json!({"job": "report", "attempts": 0})))
        .await;
    assert_eq!(outcome.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn scope_and_command_env_are_exported() {
    let mut command = ShellCommand::new(r#"test "$LAMQ_SCOPE_TENANT" = acme && test "$REGION" = eu"#);
    command.env.insert("REGION".to_string(), "eu".to_string());
    let handler = ShellJobHandler::default().with("report", command);

    let ctx = context(json!({"job": "report"}));
    ctx.scope.insert("tenant", "acme");
    assert_eq!(handler.handle(ctx).await.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn command_ignoring_stdin_still_completes() {
    let big = "x".repeat(256 * 1024);
    let outcome = handler("report", "exit 0")
        .handle(context(json!({"job": "report", "data": {"blob": big}})))
        .await;
    assert_eq!(outcome.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn large_input_with_chatty_command_completes() {
    let blob = "a".repeat(200_000);
    let cmd = r"head -c 200000 /dev/zero | tr '\0' a; cat > /dev/null";
    let handler = handler("report", cmd);
    let run = handler.handle(context(json!({"job": "report", "data": {"blob": blob}})));

    let outcome = tokio::time::timeout(Duration::from_secs(10), run).await.unwrap();
    assert_eq!(outcome.unwrap(), HandlerOutcome::Complete);
}

#[tokio::test]
async fn cancellation_stops_the_command() {
    let ctx = context(json!({"job": "report"}));
    let cancel = ctx.cancel.clone();
    let handler = handler("report", "sleep 30");

    let task = tokio::spawn(async move { handler.handle(ctx).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert!(matches!(result, Err(JobError::Cancelled)));
}

#[tokio::test]
async fn on_failed_receives_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("failed.txt");
    let mut command = ShellCommand::new("exit 1");
    command.on_failed = Some(format!(r#"printf '%s' "$LAMQ_ERROR" > '{}'"#, marker.display()));
    let handler = ShellJobHandler::default().with("report", command);

    handler.failed(context(json!({"job": "report"})), "max attempts exceeded").await;

    assert_eq!(std::fs::read_to_string(marker).unwrap(), "max attempts exceeded");
}

#[test]
fn tail_keeps_the_end_of_long_output() {
    let long = format!("{}end", "a".repeat(STDERR_TAIL * 2));
    let kept = tail(long.as_bytes());
    assert_eq!(kept.len(), STDERR_TAIL);
    assert!(kept.ends_with("end"));
}
