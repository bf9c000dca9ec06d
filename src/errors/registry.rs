// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by [`EntryPointRegistry`](crate::config::EntryPointRegistry) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The entry point cannot be invoked under the two-slot contract.
    #[error("Entry point '{name}' is not invocable: {reason}")]
    InvalidEntryPoint { name: String, reason: String },

    /// Lookup for a name that was never registered.
    #[error("No entry point registered under '{name}'")]
    NotFound { name: String },
}
