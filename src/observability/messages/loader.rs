// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for entry point resolution events.
//!
//! This module contains message types for logging events related to:
//! * Native shared library loading and release
//! * WASM module loading and instantiation
//! * Sandboxed invocation traps

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Native library opened and its export resolved.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_linkwalker::observability::messages::loader::LibraryLoaded;
///
/// let msg = LibraryLoaded {
///     library: "./libdoubler.so",
///     function: "double",
///     call_conv: "cdecl",
///     value_type: "f64",
/// };
///
/// assert!(msg.to_string().contains("libdoubler.so"));
/// ```
pub struct LibraryLoaded<'a> {
    pub library: &'a str,
    pub function: &'a str,
    pub call_conv: &'a str,
    pub value_type: &'a str,
}

impl Display for LibraryLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved '{}' from library '{}' ({}, {} slots)",
            self.function, self.library, self.call_conv, self.value_type
        )
    }
}

impl StructuredLog for LibraryLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            library = self.library,
            function = self.function,
            call_conv = self.call_conv,
            value_type = self.value_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "native_entry_point",
            span_name = name,
            library = self.library,
            function = self.function,
        )
    }
}

/// Library or module could not be turned into an entry point.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_linkwalker::observability::messages::loader::LibraryLoadFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
/// let msg = LibraryLoadFailed {
///     library: "./missing.so",
///     function: "double",
///     error: &error,
/// };
///
/// assert!(msg.to_string().starts_with("Failed to resolve 'double'"));
/// ```
pub struct LibraryLoadFailed<'a> {
    pub library: &'a str,
    pub function: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for LibraryLoadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to resolve '{}' from '{}': {}",
            self.function, self.library, self.error
        )
    }
}

impl StructuredLog for LibraryLoadFailed<'_> {
    fn log(&self) {
        tracing::error!(
            library = self.library,
            function = self.function,
            error = %self.error,
            "{}", self
        );
    }
}

/// Native library handle released.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct LibraryReleased<'a> {
    pub library: &'a str,
    pub function: &'a str,
}

impl Display for LibraryReleased<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Released library '{}' (entry point '{}')",
            self.library, self.function
        )
    }
}

impl StructuredLog for LibraryReleased<'_> {
    fn log(&self) {
        tracing::debug!(library = self.library, function = self.function, "{}", self);
    }
}

/// WASM module compiled, instantiated and its export resolved.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WasmModuleLoaded<'a> {
    pub module_path: &'a str,
    pub function: &'a str,
    pub size_bytes: usize,
    pub fuel: u64,
}

impl Display for WasmModuleLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded WASM module '{}' ({} bytes): export '{}', fuel_level={}",
            self.module_path, self.size_bytes, self.function, self.fuel
        )
    }
}

impl StructuredLog for WasmModuleLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            module_path = self.module_path,
            function = self.function,
            size_bytes = self.size_bytes,
            fuel = self.fuel,
            "{}", self
        );
    }
}

/// A sandboxed invocation trapped or exhausted its fuel.
///
/// # Log Level
/// `warn!` - Reported to the traversal as a failing status
pub struct WasmInvocationTrapped<'a> {
    pub module_path: &'a str,
    pub function: &'a str,
    pub error: &'a str,
}

impl Display for WasmInvocationTrapped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "WASM export '{}' in '{}' trapped: {}",
            self.function, self.module_path, self.error
        )
    }
}

impl StructuredLog for WasmInvocationTrapped<'_> {
    fn log(&self) {
        tracing::warn!(
            module_path = self.module_path,
            function = self.function,
            error = self.error,
            "{}", self
        );
    }
}
