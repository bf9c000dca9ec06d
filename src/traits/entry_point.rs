// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Status code returned by every entry point. Zero is success; any other value
/// is a failure code interpreted only by the processor's `on_error` policy.
pub type StatusCode = i32;

pub const STATUS_OK: StatusCode = 0;

/// Reported in place of a status when a sandboxed entry point traps or runs out of fuel.
pub const STATUS_TRAPPED: StatusCode = -1;

/// The two-slot calling contract shared by every entry point.
///
/// An entry point receives the current input value and a writable output slot,
/// and returns a [`StatusCode`]. It may only read `input` and write `output`:
/// it never sees list topology. When it returns a non-zero status the output
/// slot is not trusted, whatever it holds.
///
/// Local closures, native library exports and WASM exports all implement this
/// trait, and the processor depends on nothing else.
pub trait EntryPoint: Send + Sync {
    fn invoke(&self, input: f64, output: &mut f64) -> StatusCode;

    fn name(&self) -> &str;

    /// Whether the entry point can still be called. Registration rejects
    /// entry points that report `false`.
    fn is_invocable(&self) -> bool {
        true
    }
}
