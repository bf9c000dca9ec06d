// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use wasmtime::{Config, Engine, Instance, Memory, Module, Store, TypedFunc};

use super::detector::{detect_module_kind, ModuleKind};
use super::loader::load_wasm_bytes;
use crate::config::ValueType;
use crate::errors::{LoadError, WASM_COMPONENT_UNSUPPORTED};
use crate::observability::messages::loader::{
    LibraryLoadFailed, WasmInvocationTrapped, WasmModuleLoaded,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EntryPoint, StatusCode, STATUS_TRAPPED};

/// Name of the linear memory the module must export.
const MEMORY_EXPORT: &str = "memory";

const WASM_PAGE_SIZE: usize = 64 * 1024;

/// Instantiated module plus the two scratch slots reserved for marshalling.
struct WasmState {
    store: Store<()>,
    func: TypedFunc<(i32, i32), i32>,
    memory: Memory,
    in_offset: usize,
    out_offset: usize,
}

/// An entry point exported by a core WASM module, run inside a fuel-metered
/// wasmtime store.
///
/// The store is not reentrant, so invocations are serialized through a mutex.
pub struct WasmEntryPoint {
    name: String,
    module_path: String,
    value_type: ValueType,
    fuel: u64,
    state: Mutex<WasmState>,
}

impl WasmEntryPoint {
    /// Reads, validates and instantiates the module at `module_path`, then
    /// resolves `function`.
    pub fn load(
        module_path: &str,
        function: &str,
        value_type: ValueType,
        fuel: u64,
    ) -> Result<Self, LoadError> {
        Self::instantiate(module_path, function, value_type, fuel).map_err(|error| {
            LibraryLoadFailed {
                library: module_path,
                function,
                error: &error,
            }
            .log();
            error
        })
    }

    fn instantiate(
        module_path: &str,
        function: &str,
        value_type: ValueType,
        fuel: u64,
    ) -> Result<Self, LoadError> {
        let bytes = load_wasm_bytes(Path::new(module_path))?;

        let invalid = |reason: String| LoadError::InvalidModule {
            path: module_path.to_string(),
            reason,
        };

        let kind = detect_module_kind(&bytes).map_err(|e| invalid(e.to_string()))?;
        if kind == ModuleKind::Component {
            return Err(invalid(WASM_COMPONENT_UNSUPPORTED.to_string()));
        }

        let engine = create_engine()?;
        let module = Module::new(&engine, &bytes).map_err(|e| invalid(e.to_string()))?;

        let import_count = module.imports().len();
        if import_count != 0 {
            return Err(invalid(format!(
                "module imports {} item(s); entry point modules must be self-contained",
                import_count
            )));
        }

        let mut store = Store::new(&engine, ());
        store.set_fuel(fuel).map_err(|e| invalid(e.to_string()))?;

        let instance =
            Instance::new(&mut store, &module, &[]).map_err(|e| invalid(e.to_string()))?;

        let missing = |reason: String| LoadError::MissingExport {
            path: module_path.to_string(),
            function: function.to_string(),
            reason,
        };

        let memory = instance
            .get_memory(&mut store, MEMORY_EXPORT)
            .ok_or_else(|| invalid(format!("module must export a memory named '{}'", MEMORY_EXPORT)))?;

        let func = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, function)
            .map_err(|e| missing(format!("expected signature (i32, i32) -> i32: {}", e)))?;

        // One fresh page past whatever the module already uses holds both slots.
        let base_page = memory
            .grow(&mut store, 1)
            .map_err(|e| invalid(format!("cannot reserve slot memory: {}", e)))?;
        let in_offset = usize::try_from(base_page)
            .ok()
            .and_then(|page| page.checked_mul(WASM_PAGE_SIZE))
            .ok_or_else(|| invalid("slot memory offset out of range".to_string()))?;
        let out_offset = in_offset + 8;

        if i32::try_from(out_offset).is_err() {
            return Err(invalid("slot memory offset out of range".to_string()));
        }

        WasmModuleLoaded {
            module_path,
            function,
            size_bytes: bytes.len(),
            fuel,
        }
        .log();

        Ok(Self {
            name: function.to_string(),
            module_path: module_path.to_string(),
            value_type,
            fuel,
            state: Mutex::new(WasmState {
                store,
                func,
                memory,
                in_offset,
                out_offset,
            }),
        })
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn fuel(&self) -> u64 {
        self.fuel
    }

    fn trapped(&self, error: &str) -> StatusCode {
        WasmInvocationTrapped {
            module_path: &self.module_path,
            function: &self.name,
            error,
        }
        .log();
        STATUS_TRAPPED
    }
}

impl EntryPoint for WasmEntryPoint {
    fn invoke(&self, input: f64, output: &mut f64) -> StatusCode {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = &mut *guard;

        if let Err(e) = state.store.set_fuel(self.fuel) {
            return self.trapped(&e.to_string());
        }

        let in_bytes = self.value_type.to_le_bytes(input);
        let out_bytes = self.value_type.to_le_bytes(*output);
        for (offset, bytes) in [(state.in_offset, &in_bytes), (state.out_offset, &out_bytes)] {
            if let Err(e) = state.memory.write(&mut state.store, offset, bytes) {
                return self.trapped(&e.to_string());
            }
        }

        // Offsets were checked against i32 at load time.
        let args = (state.in_offset as i32, state.out_offset as i32);
        let status = match state.func.call(&mut state.store, args) {
            Ok(status) => status,
            Err(e) => return self.trapped(&e.to_string()),
        };

        let mut slot = vec![0u8; self.value_type.size()];
        if let Err(e) = state.memory.read(&state.store, state.out_offset, &mut slot) {
            return self.trapped(&e.to_string());
        }
        if let Some(value) = self.value_type.from_le_bytes(&slot) {
            *output = value;
        }

        status
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for WasmEntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasmEntryPoint")
            .field("name", &self.name)
            .field("module_path", &self.module_path)
            .field("value_type", &self.value_type)
            .field("fuel", &self.fuel)
            .finish()
    }
}

fn create_engine() -> Result<Engine, LoadError> {
    let mut config = Config::new();

    config.wasm_threads(false);
    config.wasm_multi_memory(false);
    config.wasm_memory64(false);

    // Every instruction consumes fuel; running out traps the invocation.
    config.consume_fuel(true);
    config.epoch_interruption(false);

    Engine::new(&config).map_err(|e| LoadError::Engine(e.to_string()))
}
