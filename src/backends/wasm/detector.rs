// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! WASM binary encoding detection.

use wasmparser::{BinaryReaderError, Encoding, Parser, Payload};

use crate::errors::LoadError;

/// Encoding declared by a WASM binary's version header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    /// Core module (binary version 1).
    Core,
    /// Component Model binary.
    Component,
}

impl ModuleKind {
    #[inline]
    pub fn is_core(self) -> bool {
        matches!(self, Self::Core)
    }
}

/// Reads the version header of `bytes` and reports its encoding.
///
/// # Errors
/// Returns [`LoadError::Parser`] when the input is empty, truncated or not a
/// WASM binary at all.
pub fn detect_module_kind(bytes: &[u8]) -> Result<ModuleKind, LoadError> {
    for payload in Parser::new(0).parse_all(bytes) {
        if let Payload::Version { encoding, .. } = payload? {
            return Ok(match encoding {
                Encoding::Module => ModuleKind::Core,
                Encoding::Component => ModuleKind::Component,
            });
        }
    }

    Err(BinaryReaderError::new("missing WASM version header", 0).into())
}
