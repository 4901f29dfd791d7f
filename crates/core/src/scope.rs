// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-scoped values shared between the worker and a job handler.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Per-invocation key/value state.
///
/// Cloning shares the same storage. The worker clears it before every job so
/// nothing leaks between invocations handled by one process.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.lock().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Drop every scoped value.
    pub fn forget(&self) {
        self.values.lock().clear();
    }

    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.values.lock().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
