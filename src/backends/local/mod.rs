// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builtins;
mod fn_entry_point;

pub use builtins::{
    list_builtin_names, register_builtins, COPY_PRIMARY, COPY_SECONDARY, DOUBLE,
    DOUBLE_NON_NEGATIVE, NEGATIVE_INPUT,
};
pub use fn_entry_point::FnEntryPoint;
