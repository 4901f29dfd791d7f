//! `lamq queue:work` validation and maintenance specs.
//!
//! None of these reach the queue service: every case stops at a
//! validation gate or the maintenance check.

use crate::prelude::*;

#[test]
fn maintenance_mode_skips_with_success() {
    cli().args(&["queue:work"]).env("LAMQ_MAINTENANCE", "1").passes();
}

#[test]
fn maintenance_mode_skips_before_reading_config() {
    let project = Project::empty();
    project.config("[queue\nbroken");

    project.lamq().args(&["queue:work"]).env("LAMQ_MAINTENANCE", "1").passes();
}

#[test]
fn maintenance_file_skips_with_success() {
    let project = Project::empty();
    project.config("[maintenance]\nfile = \"down\"\n");
    project.file("down", "");

    project.lamq().args(&["queue:work"]).passes();
}

#[test]
fn force_runs_validation_during_maintenance() {
    cli()
        .args(&["queue:work", "--force"])
        .env("LAMQ_MAINTENANCE", "1")
        .fails()
        .stderr_has(r#"The "--message" option is required"#);
}

#[test]
fn missing_message_fails() {
    cli().args(&["queue:work"]).fails().stderr_has(r#"The "--message" option is required"#);
}

#[test]
fn empty_connection_fails() {
    cli()
        .args(&["queue:work", "--connection=", "--message=e30="])
        .fails()
        .stderr_has(r#"The "--connection" option must be a string"#);
}

#[test]
fn undecodable_message_fails() {
    cli()
        .args(&["queue:work", "--message=not*base64"])
        .fails()
        .stderr_has("Unable to decode the SQS message");
}

#[test]
fn non_object_message_fails() {
    let message = record_from(json!([1, 2, 3]));
    cli()
        .args(&["queue:work", &format!("--message={message}")])
        .fails()
        .stderr_has("Unable to decode the SQS message");
}

#[test]
fn non_sqs_connection_fails() {
    let project = Project::empty();
    project.config("[queue.connections.local]\ndriver = \"sync\"\n");
    let message = record(json!({"job": "report"}));

    project
        .lamq()
        .args(&["queue:work", "--connection=local", &format!("--message={message}")])
        .fails()
        .stderr_has("Connection [local] must be an SQS connection");
}

#[test]
fn missing_event_source_fails() {
    let message = record_from(json!({
        "messageId": "message-id",
        "receiptHandle": "receipt-handle",
        "body": "{}",
    }));

    cli()
        .args(&["queue:work", &format!("--message={message}")])
        .fails()
        .stderr_has("Unable to resolve queue URL");
}

#[test]
fn invalid_config_fails() {
    let project = Project::empty();
    project.config("[queue\n");

    project.lamq().args(&["queue:work"]).fails().stderr_has("invalid config");
}
