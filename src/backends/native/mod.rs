// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Entry points exported by native shared libraries.
//!
//! An export must have the C shape `int fn(T *in, T *out)` where `T` is the
//! configured [`ValueType`]. The library handle is owned by the
//! [`NativeEntryPoint`] and closed when it is dropped.
//!
//! ```c
//! int double_value(double *in, double *out) {
//!     *out = *in * 2.0;
//!     return 0;
//! }
//! ```

use std::os::raw::c_int;
use std::path::Path;

use libloading::Library;

use crate::config::{CallConv, ValueType};
use crate::errors::LoadError;
use crate::observability::messages::loader::{LibraryLoadFailed, LibraryLoaded, LibraryReleased};
use crate::observability::messages::StructuredLog;
use crate::traits::{EntryPoint, StatusCode};

type CdeclFn<T> = unsafe extern "C" fn(*mut T, *mut T) -> c_int;
type SystemFn<T> = unsafe extern "system" fn(*mut T, *mut T) -> c_int;

/// Export resolved to a concrete signature, one variant per
/// convention and slot type.
#[derive(Clone, Copy)]
enum SlotExport {
    CdeclF64(CdeclFn<f64>),
    CdeclF32(CdeclFn<f32>),
    CdeclI64(CdeclFn<i64>),
    CdeclI32(CdeclFn<i32>),
    SystemF64(SystemFn<f64>),
    SystemF32(SystemFn<f32>),
    SystemI64(SystemFn<i64>),
    SystemI32(SystemFn<i32>),
}

/// Numeric slot types marshalled across the native boundary.
trait Slot: Copy {
    fn from_f64(value: f64) -> Self;
    fn into_f64(self) -> f64;
}

impl Slot for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
    fn into_f64(self) -> f64 {
        self
    }
}

impl Slot for f32 {
    fn from_f64(value: f64) -> Self {
        value as f32
    }
    fn into_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Slot for i64 {
    fn from_f64(value: f64) -> Self {
        value as i64
    }
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl Slot for i32 {
    fn from_f64(value: f64) -> Self {
        value as i32
    }
    fn into_f64(self) -> f64 {
        f64::from(self)
    }
}

/// Copies the two values into typed slots, calls through, and copies the
/// output slot back.
fn with_slots<T: Slot>(
    input: f64,
    output: &mut f64,
    call: impl FnOnce(*mut T, *mut T) -> c_int,
) -> StatusCode {
    let mut in_slot = T::from_f64(input);
    let mut out_slot = T::from_f64(*output);
    let status = call(&mut in_slot, &mut out_slot);
    *output = out_slot.into_f64();
    status
}

/// An entry point resolved from a native shared library.
pub struct NativeEntryPoint {
    name: String,
    library_path: String,
    export: SlotExport,
    // Keeps `export` valid. Dropped (and the library closed) with the entry point.
    _library: Library,
}

impl NativeEntryPoint {
    /// Opens `library_path` and resolves `function` with the given
    /// convention and slot type.
    pub fn load(
        library_path: &str,
        function: &str,
        call_conv: CallConv,
        value_type: ValueType,
    ) -> Result<Self, LoadError> {
        Self::open(library_path, function, call_conv, value_type).map_err(|error| {
            LibraryLoadFailed {
                library: library_path,
                function,
                error: &error,
            }
            .log();
            error
        })
    }

    fn open(
        library_path: &str,
        function: &str,
        call_conv: CallConv,
        value_type: ValueType,
    ) -> Result<Self, LoadError> {
        // SAFETY: loading a library runs its initializers. The caller names the
        // library, so trusting its initialization is the caller's decision.
        let library = unsafe { Library::new(Path::new(library_path)) }.map_err(|source| {
            LoadError::Library {
                path: library_path.to_string(),
                source,
            }
        })?;

        let export = Self::lookup(&library, library_path, function, call_conv, value_type)?;

        LibraryLoaded {
            library: library_path,
            function,
            call_conv: call_conv.as_str(),
            value_type: value_type.as_str(),
        }
        .log();

        Ok(Self {
            name: function.to_string(),
            library_path: library_path.to_string(),
            export,
            _library: library,
        })
    }

    fn lookup(
        library: &Library,
        library_path: &str,
        function: &str,
        call_conv: CallConv,
        value_type: ValueType,
    ) -> Result<SlotExport, LoadError> {
        let symbol = function.as_bytes();
        let missing = |source: libloading::Error| LoadError::MissingExport {
            path: library_path.to_string(),
            function: function.to_string(),
            reason: source.to_string(),
        };

        // SAFETY: the export is declared with the signature the caller
        // configured. A mismatch between that and the real export is
        // undefined behaviour that cannot be detected here.
        let export = unsafe {
            match (call_conv, value_type) {
                (CallConv::Cdecl, ValueType::F64) => {
                    SlotExport::CdeclF64(*library.get::<CdeclFn<f64>>(symbol).map_err(missing)?)
                }
                (CallConv::Cdecl, ValueType::F32) => {
                    SlotExport::CdeclF32(*library.get::<CdeclFn<f32>>(symbol).map_err(missing)?)
                }
                (CallConv::Cdecl, ValueType::I64) => {
                    SlotExport::CdeclI64(*library.get::<CdeclFn<i64>>(symbol).map_err(missing)?)
                }
                (CallConv::Cdecl, ValueType::I32) => {
                    SlotExport::CdeclI32(*library.get::<CdeclFn<i32>>(symbol).map_err(missing)?)
                }
                (CallConv::Stdcall, ValueType::F64) => {
                    SlotExport::SystemF64(*library.get::<SystemFn<f64>>(symbol).map_err(missing)?)
                }
                (CallConv::Stdcall, ValueType::F32) => {
                    SlotExport::SystemF32(*library.get::<SystemFn<f32>>(symbol).map_err(missing)?)
                }
                (CallConv::Stdcall, ValueType::I64) => {
                    SlotExport::SystemI64(*library.get::<SystemFn<i64>>(symbol).map_err(missing)?)
                }
                (CallConv::Stdcall, ValueType::I32) => {
                    SlotExport::SystemI32(*library.get::<SystemFn<i32>>(symbol).map_err(missing)?)
                }
            }
        };

        Ok(export)
    }

    pub fn library_path(&self) -> &str {
        &self.library_path
    }
}

impl EntryPoint for NativeEntryPoint {
    fn invoke(&self, input: f64, output: &mut f64) -> StatusCode {
        // SAFETY: the export stays valid while `_library` is alive, and both
        // slot pointers are live for the duration of the call only.
        unsafe {
            match self.export {
                SlotExport::CdeclF64(f) => with_slots::<f64>(input, output, |i, o| f(i, o)),
                SlotExport::CdeclF32(f) => with_slots::<f32>(input, output, |i, o| f(i, o)),
                SlotExport::CdeclI64(f) => with_slots::<i64>(input, output, |i, o| f(i, o)),
                SlotExport::CdeclI32(f) => with_slots::<i32>(input, output, |i, o| f(i, o)),
                SlotExport::SystemF64(f) => with_slots::<f64>(input, output, |i, o| f(i, o)),
                SlotExport::SystemF32(f) => with_slots::<f32>(input, output, |i, o| f(i, o)),
                SlotExport::SystemI64(f) => with_slots::<i64>(input, output, |i, o| f(i, o)),
                SlotExport::SystemI32(f) => with_slots::<i32>(input, output, |i, o| f(i, o)),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for NativeEntryPoint {
    fn drop(&mut self) {
        LibraryReleased {
            library: &self.library_path,
            function: &self.name,
        }
        .log();
    }
}
