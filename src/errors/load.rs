// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for entry-point resolution.
//!
//! Covers both native shared libraries and core WASM modules. Every failure to
//! turn a library identifier plus function name into an invocable entry point
//! ends up here.

use thiserror::Error;

/// Error message for component-model binaries, which cannot expose the
/// two-pointer calling convention.
pub const WASM_COMPONENT_UNSUPPORTED: &str = "Component Model binaries are not supported: entry points must be exported from a core WASM module as (i32, i32) -> i32";

#[derive(Error, Debug)]
pub enum LoadError {
    /// The shared library could not be opened.
    #[error("Failed to load library '{path}': {source}")]
    Library {
        path: String,
        #[source]
        source: libloading::Error,
    },

    /// The library or module does not export the requested symbol with the
    /// expected shape.
    #[error("Export '{function}' not found in '{path}': {reason}")]
    MissingExport {
        path: String,
        function: String,
        reason: String,
    },

    /// Calling convention name outside the recognized set.
    #[error("Unsupported calling convention '{0}': expected 'cdecl' or 'stdcall'")]
    UnsupportedCallingConvention(String),

    /// Value representation name outside the recognized set.
    #[error("Unsupported value type '{0}': expected one of f64, f32, i64, i32")]
    UnsupportedValueType(String),

    /// The WASM binary failed validation, compilation or instantiation.
    #[error("Invalid WASM module '{path}': {reason}")]
    InvalidModule { path: String, reason: String },

    /// File I/O error while reading a module.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// WASM binary parsing error from wasmparser.
    #[error("WASM parser error: {0}")]
    Parser(#[from] wasmparser::BinaryReaderError),

    /// Wasmtime engine creation or configuration error.
    #[error("Engine creation error: {0}")]
    Engine(String),
}
