// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::{EntryPoint, StatusCode};

type SlotFn = dyn Fn(f64, &mut f64) -> StatusCode + Send + Sync;

/// In-process entry point backed by a closure or function.
pub struct FnEntryPoint {
    name: String,
    func: Box<SlotFn>,
}

impl FnEntryPoint {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(f64, &mut f64) -> StatusCode + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl EntryPoint for FnEntryPoint {
    fn invoke(&self, input: f64, output: &mut f64) -> StatusCode {
        (self.func)(input, output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FnEntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEntryPoint").field("name", &self.name).finish()
    }
}
