// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in local entry points.
//!
//! Nothing here is registered at load time. Call [`register_builtins`] during
//! startup to make them available by name.

use crate::config::EntryPointRegistry;
use crate::errors::RegistryError;
use crate::traits::{StatusCode, STATUS_OK};

pub const COPY_PRIMARY: &str = "dll1";
pub const COPY_SECONDARY: &str = "dll2";
pub const DOUBLE: &str = "double";
pub const DOUBLE_NON_NEGATIVE: &str = "double_non_negative";

/// Status returned by `double_non_negative` for negative input.
pub const NEGATIVE_INPUT: StatusCode = 1;

type Builtin = fn(f64, &mut f64) -> StatusCode;

const BUILTINS: &[(&str, Builtin)] = &[
    (COPY_PRIMARY, copy_value),
    (COPY_SECONDARY, copy_value),
    (DOUBLE, double),
    (DOUBLE_NON_NEGATIVE, double_non_negative),
];

fn copy_value(input: f64, output: &mut f64) -> StatusCode {
    tracing::trace!(input, "copy");
    *output = input;
    STATUS_OK
}

fn double(input: f64, output: &mut f64) -> StatusCode {
    *output = input * 2.0;
    STATUS_OK
}

fn double_non_negative(input: f64, output: &mut f64) -> StatusCode {
    if input < 0.0 {
        return NEGATIVE_INPUT;
    }
    *output = input * 2.0;
    STATUS_OK
}

/// Registers every built-in entry point into `registry`.
pub fn register_builtins(registry: &EntryPointRegistry) -> Result<(), RegistryError> {
    for (name, func) in BUILTINS {
        registry.register_fn(name, *func)?;
    }
    Ok(())
}

/// List all built-in entry point names
pub fn list_builtin_names() -> Vec<&'static str> {
    BUILTINS.iter().map(|(name, _)| *name).collect()
}
