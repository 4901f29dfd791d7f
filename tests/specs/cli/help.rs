//! CLI help output specs

use crate::prelude::*;

#[test]
fn lamq_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn lamq_help_lists_push_but_hides_work() {
    cli().args(&["--help"]).passes().stdout_has("queue:push").stdout_lacks("queue:work");
}

#[test]
fn hidden_work_command_still_has_help() {
    cli()
        .args(&["queue:work", "--help"])
        .passes()
        .stdout_has("--connection")
        .stdout_has("--message")
        .stdout_has("--force");
}

#[test]
fn lamq_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
