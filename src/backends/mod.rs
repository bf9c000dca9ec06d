// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Entry Point Backends
//!
//! Every backend produces an [`EntryPoint`](crate::traits::EntryPoint): a
//! callable with the two-slot `(input, output) -> status` contract.
//!
//! | Backend | Source | Isolation |
//! |---------|--------|-----------|
//! | [`local`] | In-process Rust closures, usually held in the registry | None |
//! | [`native`] | Exports of a shared library opened with `libloading` | None |
//! | [`wasm`] | Exports of a core WASM module run under wasmtime | Sandboxed, fuel-metered |
//!
//! [`resolve`] picks between the native and WASM backends from the library
//! identifier alone: an existing file that starts with the WASM magic number
//! is loaded as a module, anything else is handed to the platform loader.

pub mod local;
pub mod native;
pub mod wasm;

mod resolver;

pub use resolver::{resolve, resolve_with_fuel, LibraryKind};
