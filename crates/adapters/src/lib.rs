// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the external collaborators of the lamq worker: the SQS
//! client, application job handlers, failed-job storage and the
//! maintenance-mode switch.

pub mod failed;
pub mod handler;
pub mod maintenance;
pub mod queue;

pub use failed::{FailedJobError, FailedJobProvider, JsonlFailedJobProvider, NullFailedJobProvider};
pub use handler::{
    HandlerOutcome, JobContext, JobError, JobHandler, ShellCommand, ShellJobHandler,
    EXIT_RELEASE,
};
pub use maintenance::{FileMaintenance, MaintenanceMode};
pub use queue::{QueueClient, QueueError, SqsClient, SqsClientConfig};

#[cfg(any(test, feature = "test-support"))]
pub use failed::MemoryFailedJobProvider;
#[cfg(any(test, feature = "test-support"))]
pub use handler::{FakeJobHandler, FakeStep};
#[cfg(any(test, feature = "test-support"))]
pub use maintenance::StaticMaintenance;
#[cfg(any(test, feature = "test-support"))]
pub use queue::{FakeQueueClient, QueueCall};
