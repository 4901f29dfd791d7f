// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lamq.toml` configuration.
//!
//! Loaded once at startup and threaded through the commands. A missing file
//! means built-in defaults: a single `sqs` connection configured from the
//! standard AWS/SQS environment variables.

use lamq_adapters::{
    FailedJobProvider, FileMaintenance, JsonlFailedJobProvider, NullFailedJobProvider,
    ShellCommand, ShellJobHandler, SqsClientConfig,
};
use lamq_core::{QueueEndpointResolver, QueueOverrides};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lamq.toml";

/// Name of the built-in connection.
pub const DEFAULT_CONNECTION: &str = "sqs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("Connection [{0}] is not configured")]
    UnknownConnection(String),
    #[error("Connection [{0}] must be an SQS connection")]
    NotSqs(String),
}

/// Environment-derived settings for the built-in `sqs` connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqsDefaults {
    pub region: String,
    pub prefix: String,
    pub suffix: String,
    pub queue: String,
}

impl Default for SqsDefaults {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            queue: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub queue: QueueSection,
    pub jobs: HashMap<String, ShellCommand>,
    pub maintenance: MaintenanceSection,
    pub failed_jobs: FailedJobsSection,
    pub logging: LoggingSection,
    /// Queue endpoint overrides captured from the environment
    #[serde(skip)]
    pub overrides: QueueOverrides,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueSection {
    /// Connection used when a command names none
    pub default: String,
    pub connections: BTreeMap<String, ConnectionConfig>,
}

impl Default for QueueSection {
    fn default() -> Self {
        Self { default: DEFAULT_CONNECTION.to_string(), connections: BTreeMap::new() }
    }
}

/// One named queue connection, tagged by its driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "driver", rename_all = "lowercase")]
pub enum ConnectionConfig {
    Sqs(SqsConnection),
    Sync {},
    Database {},
    Null {},
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqsConnection {
    /// Falls back to the environment's region
    pub region: Option<String>,
    pub prefix: String,
    pub suffix: String,
    /// Default queue name
    pub queue: String,
    /// Custom service URL
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub token: Option<String>,
    /// Seconds
    pub http_timeout: u64,
    /// Seconds
    pub connect_timeout: u64,
}

impl Default for SqsConnection {
    fn default() -> Self {
        Self {
            region: None,
            prefix: String::new(),
            suffix: String::new(),
            queue: "default".to_string(),
            endpoint: None,
            key: None,
            secret: None,
            token: None,
            http_timeout: 60,
            connect_timeout: 60,
        }
    }
}

impl SqsConnection {
    fn from_defaults(defaults: &SqsDefaults) -> Self {
        Self {
            region: Some(defaults.region.clone()),
            prefix: defaults.prefix.clone(),
            suffix: defaults.suffix.clone(),
            queue: defaults.queue.clone(),
            ..Self::default()
        }
    }

    pub fn client_config(&self) -> SqsClientConfig {
        let defaults = SqsClientConfig::default();
        SqsClientConfig {
            region: self.region.clone().unwrap_or(defaults.region),
            endpoint: self.endpoint.clone().filter(|e| !e.is_empty()),
            key: self.key.clone(),
            secret: self.secret.clone(),
            token: self.token.clone(),
            http_timeout: Duration::from_secs(self.http_timeout),
            connect_timeout: Duration::from_secs(self.connect_timeout),
        }
    }

    pub fn resolver(&self, overrides: QueueOverrides) -> QueueEndpointResolver {
        QueueEndpointResolver::new(self.queue.clone())
            .prefix(self.prefix.clone())
            .suffix(self.suffix.clone())
            .overrides(overrides)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaintenanceSection {
    /// Marker file; maintenance mode is on while it exists
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FailedJobsSection {
    /// JSON-lines log of failed jobs
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Wrap every log event in an `invocation{request_id}` span
    pub request_context: bool,
}

impl Config {
    /// Load from `path`, else `./lamq.toml` when present, else defaults.
    pub fn load(path: Option<&Path>, defaults: &SqsDefaults) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        let Some(path) = path else {
            return Ok(Self::default().with_defaults(defaults));
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        Self::parse(&text, defaults)
            .map_err(|source| ConfigError::Parse { path, source: Box::new(source) })
    }

    pub fn parse(text: &str, defaults: &SqsDefaults) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(text)?;
        Ok(config.with_defaults(defaults))
    }

    /// Add the built-in `sqs` connection and fill in missing regions.
    fn with_defaults(mut self, defaults: &SqsDefaults) -> Self {
        self.queue
            .connections
            .entry(DEFAULT_CONNECTION.to_string())
            .or_insert_with(|| ConnectionConfig::Sqs(SqsConnection::from_defaults(defaults)));
        for connection in self.queue.connections.values_mut() {
            if let ConnectionConfig::Sqs(sqs) = connection {
                sqs.region.get_or_insert_with(|| defaults.region.clone());
            }
        }
        self
    }

    pub fn with_overrides(mut self, overrides: QueueOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn connection(&self, name: &str) -> Result<&ConnectionConfig, ConfigError> {
        self.queue.connections.get(name).ok_or_else(|| ConfigError::UnknownConnection(name.to_string()))
    }

    /// Connection `name`, which must use the SQS driver.
    pub fn sqs_connection(&self, name: &str) -> Result<&SqsConnection, ConfigError> {
        match self.connection(name)? {
            ConnectionConfig::Sqs(sqs) => Ok(sqs),
            _ => Err(ConfigError::NotSqs(name.to_string())),
        }
    }

    pub fn handler(&self) -> ShellJobHandler {
        ShellJobHandler::new(self.jobs.clone())
    }

    pub fn maintenance(&self, forced: bool) -> FileMaintenance {
        FileMaintenance::new(self.maintenance.file.clone()).forced(forced)
    }

    pub fn failed_jobs(&self) -> Box<dyn FailedJobProvider> {
        match &self.failed_jobs.path {
            Some(path) => Box::new(JsonlFailedJobProvider::new(path.clone())),
            None => Box::new(NullFailedJobProvider),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
