//! `lamq queue:push` specs that stop before contacting the queue service.

use crate::prelude::*;

#[test]
fn data_must_be_a_json_object() {
    cli()
        .args(&["queue:push", "report", "--data", "[1]"])
        .fails()
        .stderr_has("JSON data must be an object");
}

#[test]
fn unconfigured_queue_fails() {
    cli()
        .args(&["queue:push", "report", "--queue", "emails"])
        .fails()
        .stderr_has("Queue [emails] is not configured");
}

#[test]
fn non_sqs_connection_fails() {
    let project = Project::empty();
    project.config("[queue.connections.local]\ndriver = \"null\"\n");

    project
        .lamq()
        .args(&["queue:push", "report", "--connection", "local"])
        .fails()
        .stderr_has("Connection [local] must be an SQS connection");
}
