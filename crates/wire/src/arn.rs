// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event source ARN parsing.

use std::fmt;

/// The parts of `arn:aws:sqs:<region>:<account>:<queue>` needed to address
/// the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueArn {
    pub region: String,
    pub account: String,
    pub queue: String,
}

impl QueueArn {
    /// Parse an event source ARN; `None` when fields 3–5 are missing or empty.
    pub fn parse(arn: &str) -> Option<Self> {
        let mut fields = arn.split(':').skip(3);
        let region = fields.next().filter(|s| !s.is_empty())?;
        let account = fields.next().filter(|s| !s.is_empty())?;
        let queue = fields.next().filter(|s| !s.is_empty())?;
        Some(Self { region: region.to_string(), account: account.to_string(), queue: queue.to_string() })
    }

    /// Queue URL on the public SQS endpoint for the ARN's region.
    pub fn queue_url(&self) -> String {
        format!("https://sqs.{}.amazonaws.com/{}/{}", self.region, self.account, self.queue)
    }
}

impl fmt::Display for QueueArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arn:aws:sqs:{}:{}:{}", self.region, self.account, self.queue)
    }
}

#[cfg(test)]
#[path = "arn_tests.rs"]
mod tests;
