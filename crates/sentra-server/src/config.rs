// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration is structurally valid but semantically wrong.
    #[error("Invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// URI of the server's own namespace.
    #[serde(default = "default_namespace_uri")]
    pub namespace_uri: String,

    /// Namespace index assigned to this server's nodes.
    #[serde(default = "default_namespace_index")]
    pub namespace_index: u16,

    /// Background event producer settings.
    #[serde(default)]
    pub producer: ProducerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            namespace_uri: default_namespace_uri(),
            namespace_index: default_namespace_index(),
            producer: ProducerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks semantic constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace_uri.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "namespace_uri must not be empty".to_string(),
            });
        }
        if self.namespace_index == 0 {
            return Err(ConfigError::Invalid {
                reason: "namespace_index 0 is reserved for the standard namespace".to_string(),
            });
        }
        Ok(())
    }
}

/// Background event producer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Whether the periodic event producer runs.
    #[serde(default)]
    pub enabled: bool,

    /// Tick interval.
    #[serde(default = "default_producer_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Severity of produced events.
    #[serde(default = "default_event_severity")]
    pub event_severity: u16,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: default_producer_interval(),
            event_severity: default_event_severity(),
        }
    }
}

fn default_namespace_uri() -> String {
    "urn:sentra:address-space".to_string()
}

fn default_namespace_index() -> u16 {
    2
}

fn default_producer_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_event_severity() -> u16 {
    2
}
