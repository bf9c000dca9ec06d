// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sandboxed entry points exported by core WASM modules.
//!
//! A module qualifies when it exports a linear memory named `memory` and a
//! function with the signature `(i32, i32) -> i32`. Both parameters are byte
//! offsets into that memory: the first points at the input slot, the second at
//! the output slot. Slots hold one little-endian value of the configured
//! [`ValueType`](crate::config::ValueType).
//!
//! ```wat
//! (module
//!   (memory (export "memory") 1)
//!   (func (export "double") (param $in i32) (param $out i32) (result i32)
//!     local.get $out
//!     local.get $in
//!     f64.load
//!     f64.const 2
//!     f64.mul
//!     f64.store
//!     i32.const 0))
//! ```
//!
//! Each invocation runs with a fresh fuel budget. A trap, including fuel
//! exhaustion, is reported as [`STATUS_TRAPPED`](crate::traits::STATUS_TRAPPED)
//! rather than unwinding into the host. Component Model binaries are rejected
//! at load time.

mod detector;
mod entry_point;
mod loader;

pub use detector::{detect_module_kind, ModuleKind};
pub use entry_point::WasmEntryPoint;
pub use loader::{load_wasm_bytes, MAX_WASM_SIZE};

/// The four bytes every WASM binary starts with.
pub const WASM_MAGIC: &[u8; 4] = b"\0asm";
