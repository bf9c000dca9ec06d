// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reads WASM binaries from disk with a size limit.

use std::path::Path;

use crate::errors::LoadError;

/// Maximum allowed size for WASM binaries (16 MB)
pub const MAX_WASM_SIZE: usize = 16 * 1024 * 1024;

/// Reads the whole binary at `path`, rejecting files over [`MAX_WASM_SIZE`].
///
/// The bytes are not parsed here; see [`detect_module_kind`](super::detect_module_kind).
pub fn load_wasm_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    if bytes.len() > MAX_WASM_SIZE {
        return Err(LoadError::InvalidModule {
            path: path.display().to_string(),
            reason: format!(
                "WASM file too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_WASM_SIZE
            ),
        });
    }

    tracing::debug!(module_path = %path.display(), size_bytes = bytes.len(), "Read WASM binary");

    Ok(bytes)
}
