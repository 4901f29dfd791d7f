// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use lamq_adapters::{FailedJobError, QueueError};
use lamq_core::EndpointError;
use thiserror::Error;

/// Errors that stop a job from being processed or published
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("failed to record failed job: {0}")]
    FailedJob(#[from] FailedJobError),
}
