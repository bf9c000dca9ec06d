// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // local, native and WASM entry points
pub mod config;     // config + registry
pub mod engine;     // linked list processor
pub mod errors;     // error handling
pub mod list;       // node and list construction
pub mod observability;
pub mod traits;     // entry point + stop condition contracts
