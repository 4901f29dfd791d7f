// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Options for processing one job.

use std::time::Duration;

/// Worker settings for a single invocation.
///
/// Built once from the command line and passed by value to the worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Seconds before a released message becomes visible again
    pub delay: i64,
    /// Hard deadline in seconds; 0 disables it
    pub timeout: u64,
    /// Attempts before a job fails permanently; 0 is unlimited
    pub max_tries: u32,
    /// Run even when the application is in maintenance mode
    pub force: bool,
}

impl WorkerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options from raw command-line integers; negatives clamp to 0.
    pub fn from_args(delay: i64, timeout: i64, tries: i64, force: bool) -> Self {
        Self {
            delay,
            timeout: timeout.max(0) as u64,
            max_tries: u32::try_from(tries.max(0)).unwrap_or(u32::MAX),
            force,
        }
    }

    crate::setters! {
        set { delay: i64, timeout: u64, max_tries: u32, force: bool }
    }

    /// Deadline for a job, preferring the job's own timeout.
    pub fn deadline(&self, job_timeout: Option<u64>) -> Option<Duration> {
        match job_timeout.unwrap_or(self.timeout) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Attempt limit for a job, preferring the job's own `maxTries`.
    pub fn max_tries_for(&self, job_max_tries: Option<u32>) -> u32 {
        job_max_tries.unwrap_or(self.max_tries)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
