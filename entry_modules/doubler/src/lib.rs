// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sample entry points for the-linkwalker.
//!
//! Every export follows the two-slot contract: read `*input`, write `*output`,
//! return `0` on success. On wasm32 the pointers are offsets into the exported
//! linear memory, which the host fills before each call.

/// Status returned by `double_non_negative` for negative input.
pub const NEGATIVE_INPUT: i32 = 1;

/// Copies the input slot to the output slot.
///
/// # Safety
///
/// Both pointers must be valid, aligned and non-overlapping for the call.
#[no_mangle]
pub unsafe extern "C" fn copy(input: *const f64, output: *mut f64) -> i32 {
    *output = *input;
    0
}

/// Writes twice the input to the output slot.
///
/// # Safety
///
/// Both pointers must be valid, aligned and non-overlapping for the call.
#[no_mangle]
pub unsafe extern "C" fn double(input: *const f64, output: *mut f64) -> i32 {
    *output = *input * 2.0;
    0
}

/// Like [`double`], but rejects negative input with [`NEGATIVE_INPUT`] and
/// leaves the output slot alone.
///
/// # Safety
///
/// Both pointers must be valid, aligned and non-overlapping for the call.
#[no_mangle]
pub unsafe extern "C" fn double_non_negative(input: *const f64, output: *mut f64) -> i32 {
    if *input < 0.0 {
        return NEGATIVE_INPUT;
    }
    *output = *input * 2.0;
    0
}

/// `i32` variant of [`double`], for processors bound with `value_type: i32`.
///
/// # Safety
///
/// Both pointers must be valid, aligned and non-overlapping for the call.
#[no_mangle]
pub unsafe extern "C" fn double_i32(input: *const i32, output: *mut i32) -> i32 {
    match (*input).checked_mul(2) {
        Some(doubled) => {
            *output = doubled;
            0
        }
        None => 2,
    }
}
