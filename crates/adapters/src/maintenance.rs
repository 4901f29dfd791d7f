// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance-mode switch.

use std::path::PathBuf;

/// Reports whether the application is down for maintenance.
pub trait MaintenanceMode: Send + Sync + 'static {
    fn is_down(&self) -> bool;
}

/// Down when forced or when a marker file exists.
#[derive(Debug, Clone, Default)]
pub struct FileMaintenance {
    file: Option<PathBuf>,
    forced: bool,
}

impl FileMaintenance {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file, forced: false }
    }

    pub fn forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }
}

impl MaintenanceMode for FileMaintenance {
    fn is_down(&self) -> bool {
        self.forced || self.file.as_ref().is_some_and(|f| f.exists())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::MaintenanceMode;

    /// Fixed maintenance state
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StaticMaintenance(pub bool);

    impl MaintenanceMode for StaticMaintenance {
        fn is_down(&self) -> bool {
            self.0
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::StaticMaintenance;

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
