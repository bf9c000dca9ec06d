// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::ProcessError;

/// Errors that can occur while loading a run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format '{0}': expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Process(#[from] ProcessError),
}
