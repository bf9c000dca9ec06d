// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for entry point registry events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Entry point registered under a new name.
///
/// # Log Level
/// `debug!` - Startup wiring
///
/// # Example
/// ```
/// use the_linkwalker::observability::messages::registry::EntryPointRegistered;
///
/// let msg = EntryPointRegistered {
///     name: "double",
///     registered_count: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Registered entry point 'double' (3 registered)");
/// ```
pub struct EntryPointRegistered<'a> {
    pub name: &'a str,
    pub registered_count: usize,
}

impl Display for EntryPointRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered entry point '{}' ({} registered)",
            self.name, self.registered_count
        )
    }
}

impl StructuredLog for EntryPointRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            entry_point = self.name,
            registered_count = self.registered_count,
            "{}", self
        );
    }
}

/// A registration overwrote an existing entry point of the same name.
///
/// # Log Level
/// `warn!` - Last write wins, which may hide a wiring mistake
pub struct EntryPointReplaced<'a> {
    pub name: &'a str,
}

impl Display for EntryPointReplaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Entry point '{}' replaced by a new registration", self.name)
    }
}

impl StructuredLog for EntryPointReplaced<'_> {
    fn log(&self) {
        tracing::warn!(entry_point = self.name, "{}", self);
    }
}

/// Lookup of an unregistered name.
///
/// # Log Level
/// `debug!` - The caller receives the error and decides
pub struct EntryPointLookupFailed<'a> {
    pub name: &'a str,
}

impl Display for EntryPointLookupFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No entry point registered under '{}'", self.name)
    }
}

impl StructuredLog for EntryPointLookupFailed<'_> {
    fn log(&self) {
        tracing::debug!(entry_point = self.name, "{}", self);
    }
}
