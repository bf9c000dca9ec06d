// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::resolve_with_fuel;
use crate::config::consts::{DEFAULT_FUEL_LEVEL, DEFAULT_ON_ERROR, MAX_FUEL_LEVEL, MIN_FUEL_LEVEL};
use crate::config::{CallConv, EntryPointRegistry, ValueType};
use crate::engine::{LinkedListProcessor, OnError, StopRule};
use crate::errors::{ConfigError, ProcessError};
use crate::list::ListKind;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete configuration for one processing run.
///
/// Loaded from YAML or TOML. Only `entry_point` is required.
///
/// # Example
/// ```yaml
/// entry_point:
///   source: library
///   library: ./libdoubler.so
///   function: double
///   call_conv: cdecl
/// value_type: f64
/// list_kind: singly
/// on_error: skip
/// stop_when:
///   output_above: 5.0
/// wasm:
///   fuel:
///     default: 100000000
/// ```
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub entry_point: EntryPointConfig,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub list_kind: ListKind,
    #[serde(default = "default_on_error")]
    pub on_error: String,
    #[serde(default)]
    pub stop_when: Option<StopRule>,
    #[serde(default)]
    pub wasm: WasmConfig,
}

fn default_on_error() -> String {
    DEFAULT_ON_ERROR.to_string()
}

/// Where the processor's entry point comes from.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EntryPointConfig {
    /// Export of a native shared library or core WASM module.
    Library {
        library: String,
        function: String,
        #[serde(default)]
        call_conv: CallConv,
    },
    /// Name in the entry point registry.
    Registry { function: String },
}

impl EntryPointConfig {
    pub fn function(&self) -> &str {
        match self {
            Self::Library { function, .. } | Self::Registry { function } => function,
        }
    }
}

/// WASM-specific configuration options.
///
/// # Example
/// ```yaml
/// wasm:
///   fuel:
///     default: 100000000
///     minimum: 1000000
///     maximum: 500000000
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct WasmConfig {
    #[serde(default)]
    pub fuel: FuelConfig,
}

/// Fuel consumption configuration for WASM entry points.
///
/// Fuel is refilled before every invocation, so it bounds the work done for a
/// single node. The maximum is a hard limit.
#[derive(Debug, Default, Deserialize)]
pub struct FuelConfig {
    pub default: Option<u64>,
    pub minimum: Option<u64>,
    pub maximum: Option<u64>,
}

impl FuelConfig {
    /// Get the default fuel level, using built-in default if not configured.
    pub fn get_default(&self) -> u64 {
        self.default.unwrap_or(DEFAULT_FUEL_LEVEL)
    }

    /// Get the minimum fuel level, using built-in default if not configured.
    pub fn get_minimum(&self) -> u64 {
        self.minimum.unwrap_or(MIN_FUEL_LEVEL)
    }

    /// Get the maximum fuel level, using built-in default if not configured.
    pub fn get_maximum(&self) -> u64 {
        self.maximum.unwrap_or(MAX_FUEL_LEVEL)
    }

    /// Clamp a fuel level to the configured bounds.
    ///
    /// # Example
    /// ```
    /// use the_linkwalker::config::FuelConfig;
    ///
    /// let config = FuelConfig::default();
    /// let fuel = config.validate_and_clamp(1_000_000_000); // Too high
    /// assert_eq!(fuel, 500_000_000); // Clamped to maximum
    /// ```
    pub fn validate_and_clamp(&self, requested: u64) -> u64 {
        let min = self.get_minimum();
        let max = self.get_maximum().max(min);

        if requested < min || requested > max {
            tracing::warn!(requested, min, max, "Fuel level out of bounds, clamping");
        }
        requested.clamp(min, max)
    }

    /// The per-invocation fuel to use: the configured default, clamped.
    pub fn effective(&self) -> u64 {
        self.validate_and_clamp(self.get_default())
    }
}

impl RunConfig {
    /// The parsed `on_error` policy.
    pub fn on_error(&self) -> Result<OnError, ProcessError> {
        self.on_error.parse()
    }

    /// Resolves the configured entry point and binds a processor to it.
    pub fn build_processor(
        &self,
        registry: &EntryPointRegistry,
    ) -> Result<LinkedListProcessor, ProcessError> {
        match &self.entry_point {
            EntryPointConfig::Library {
                library,
                function,
                call_conv,
            } => {
                let entry_point = resolve_with_fuel(
                    library,
                    function,
                    *call_conv,
                    self.value_type,
                    self.wasm.fuel.effective(),
                )
                .map_err(|e| ProcessError::resolution(function, e))?;
                Ok(LinkedListProcessor::with_entry_point(
                    entry_point,
                    self.value_type,
                    self.list_kind.clone(),
                ))
            }
            EntryPointConfig::Registry { function } => LinkedListProcessor::from_registry(
                registry,
                function,
                self.value_type,
                self.list_kind.clone(),
            ),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.on_error()?;

        if self.entry_point.function().trim().is_empty() {
            return Err(ConfigError::Invalid(
                "entry_point.function must not be empty".to_string(),
            ));
        }
        if let EntryPointConfig::Library { library, .. } = &self.entry_point {
            if library.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "entry_point.library must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Parse a config from a string in the given format (`yaml`, `yml` or `toml`).
pub fn parse_config(content: &str, format: &str) -> Result<RunConfig, ConfigError> {
    let cfg: RunConfig = match format.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content)?,
        "toml" => toml::from_str(content)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Load and validate a config file. The format follows the file extension.
///
/// The `on_error` policy is checked here, so an invalid policy never reaches
/// a traversal.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content, &format)
}
