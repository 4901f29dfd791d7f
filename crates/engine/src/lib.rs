// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lamq-engine: runs one delivered SQS job under a deadline

mod error;
mod job;
mod queue;
mod worker;

pub use error::WorkerError;
pub use job::SqsJob;
pub use queue::SqsQueue;
pub use worker::{RunOutcome, Worker, MAX_ATTEMPTS_EXCEEDED};
