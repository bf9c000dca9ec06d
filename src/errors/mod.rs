// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod load;
mod process;
mod registry;

pub use config::ConfigError;
pub use load::{LoadError, WASM_COMPONENT_UNSUPPORTED};
pub use process::ProcessError;
pub use registry::RegistryError;
