// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failed-job storage.

use lamq_core::FailedJob;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FailedJobError {
    #[error("failed to write failed job log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize failed job: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sink for jobs that failed permanently.
pub trait FailedJobProvider: Send + Sync + 'static {
    fn log(&self, job: &FailedJob) -> Result<(), FailedJobError>;
}

/// Appends one JSON object per failed job to a file.
#[derive(Debug, Clone)]
pub struct JsonlFailedJobProvider {
    path: PathBuf,
}

impl JsonlFailedJobProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FailedJobProvider for JsonlFailedJobProvider {
    fn log(&self, job: &FailedJob) -> Result<(), FailedJobError> {
        let io = |source| FailedJobError::Io { path: self.path.clone(), source };
        let mut line = serde_json::to_string(job)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path).map_err(io)?;
        file.write_all(line.as_bytes()).map_err(io)
    }
}

impl FailedJobProvider for Box<dyn FailedJobProvider> {
    fn log(&self, job: &FailedJob) -> Result<(), FailedJobError> {
        (**self).log(job)
    }
}

/// Discards failed jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFailedJobProvider;

impl FailedJobProvider for NullFailedJobProvider {
    fn log(&self, _job: &FailedJob) -> Result<(), FailedJobError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{FailedJobError, FailedJobProvider};
    use lamq_core::FailedJob;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Keeps failed jobs in memory
    #[derive(Clone, Default)]
    pub struct MemoryFailedJobProvider {
        jobs: Arc<Mutex<Vec<FailedJob>>>,
    }

    impl MemoryFailedJobProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn jobs(&self) -> Vec<FailedJob> {
            self.jobs.lock().clone()
        }
    }

    impl FailedJobProvider for MemoryFailedJobProvider {
        fn log(&self, job: &FailedJob) -> Result<(), FailedJobError> {
            self.jobs.lock().push(job.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::MemoryFailedJobProvider;

#[cfg(test)]
#[path = "failed_tests.rs"]
mod tests;
