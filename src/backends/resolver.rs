// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::backends::native::NativeEntryPoint;
use crate::backends::wasm::{WasmEntryPoint, WASM_MAGIC};
use crate::config::consts::DEFAULT_FUEL_LEVEL;
use crate::config::{CallConv, ValueType};
use crate::errors::LoadError;
use crate::traits::EntryPoint;

/// How a library identifier will be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Native,
    Wasm,
}

impl LibraryKind {
    /// Sniffs `library`. Only a readable file beginning with `\0asm` is WASM;
    /// bare names like `libm.so.6` are left to the platform loader's search path.
    pub fn detect(library: &str) -> Self {
        let path = Path::new(library);
        if !path.is_file() {
            return Self::Native;
        }

        let mut magic = [0u8; 4];
        match File::open(path).and_then(|mut file| file.read_exact(&mut magic)) {
            Ok(()) if &magic == WASM_MAGIC => Self::Wasm,
            _ => Self::Native,
        }
    }
}

/// Resolves `function` from `library` with the default WASM fuel budget.
pub fn resolve(
    library: &str,
    function: &str,
    call_conv: CallConv,
    value_type: ValueType,
) -> Result<Arc<dyn EntryPoint>, LoadError> {
    resolve_with_fuel(library, function, call_conv, value_type, DEFAULT_FUEL_LEVEL)
}

/// Resolves `function` from `library`. `fuel` applies to WASM modules only;
/// `call_conv` applies to native libraries only.
pub fn resolve_with_fuel(
    library: &str,
    function: &str,
    call_conv: CallConv,
    value_type: ValueType,
    fuel: u64,
) -> Result<Arc<dyn EntryPoint>, LoadError> {
    let entry_point: Arc<dyn EntryPoint> = match LibraryKind::detect(library) {
        LibraryKind::Wasm => Arc::new(WasmEntryPoint::load(library, function, value_type, fuel)?),
        LibraryKind::Native => {
            Arc::new(NativeEntryPoint::load(library, function, call_conv, value_type)?)
        }
    };
    Ok(entry_point)
}
