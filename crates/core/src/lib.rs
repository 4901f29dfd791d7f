// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lamq-core: queue data model for the lamq SQS job bridge

pub mod macros;

pub mod clock;
pub mod endpoint;
pub mod envelope;
pub mod failed;
pub mod options;
pub mod payload;
pub mod scope;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use endpoint::{
    is_absolute_url, override_key, resolve, EndpointError, QueueEndpointResolver, QueueOverrides,
    FIFO_SUFFIX, OVERRIDE_NAMESPACE,
};
pub use envelope::{seconds_until, DeleteMessage, JobEnvelope, SendMessage, SqsMessage};
pub use failed::FailedJob;
pub use options::WorkerOptions;
pub use payload::JobPayload;
pub use scope::Scope;
