// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;
mod value;

pub mod consts;

pub use loader::{
    load_config, parse_config, EntryPointConfig, FuelConfig, RunConfig, WasmConfig,
};
pub use registry::EntryPointRegistry;
pub use value::{CallConv, ValueType};
