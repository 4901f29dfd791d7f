// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lamq: run queued jobs one SQS message per serverless invocation

mod commands;
mod config;
mod env;
mod exit_error;
mod logging;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Instrument;

use crate::config::Config;
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "lamq", version, about = "Serverless SQS job worker")]
struct Cli {
    /// Path to the config file (default: $LAMQ_CONFIG, then ./lamq.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one SQS message record
    #[command(name = "queue:work", hide = true)]
    Work(commands::work::WorkArgs),
    /// Push a job onto an SQS queue
    #[command(name = "queue:push")]
    Push(commands::push::PushArgs),
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    logging::init(&env::log_filter(), env::log_json());

    // Forced maintenance skips before the config file is read
    if let Commands::Work(args) = &command {
        if env::maintenance_forced() && !args.force {
            tracing::info!("application is down for maintenance, skipping job");
            return Ok(());
        }
    }

    let path = cli.config.or_else(env::config_path);
    let config = Config::load(path.as_deref(), &env::sqs_defaults())
        .map_err(ExitError::failure)?
        .with_overrides(env::queue_overrides());

    let request_context = env::log_request_context().unwrap_or(config.logging.request_context);
    let span = logging::invocation_span(request_context, env::request_id());

    async move {
        match command {
            Commands::Work(args) => commands::work::handle(args, &config).await,
            Commands::Push(args) => commands::push::handle(args, &config).await,
        }
    }
    .instrument(span)
    .await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("Error: {err:#}");
                1
            }
        },
    };
    // Exiting here also ends any job task still running past its deadline
    std::process::exit(code);
}
