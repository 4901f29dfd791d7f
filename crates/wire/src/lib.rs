// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound message format for `lamq queue:work`.
//!
//! Wire format: base64 of one JSON object shaped like a Lambda SQS event
//! record (`messageId`, `receiptHandle`, `body`, `attributes`,
//! `messageAttributes`, `eventSourceARN`).

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod arn;
mod record;

pub use arn::QueueArn;
pub use record::{decode, DecodeError, EventRecord};
