// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::LoadError;

/// The fixed numeric representation of the input/output slots.
///
/// Node values are held as `f64`. At the slot boundary they are converted to
/// this representation: integer types truncate toward zero and saturate at
/// their bounds, `f32` rounds to nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ValueType {
    #[default]
    F64,
    F32,
    I64,
    I32,
}

impl ValueType {
    /// Width of one slot in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }

    /// Round-trips `value` through this representation.
    pub fn narrow(self, value: f64) -> f64 {
        match self {
            Self::F64 => value,
            Self::F32 => f64::from(value as f32),
            Self::I64 => (value as i64) as f64,
            Self::I32 => f64::from(value as i32),
        }
    }

    /// Little-endian encoding of `value` in this representation.
    pub fn to_le_bytes(self, value: f64) -> Vec<u8> {
        match self {
            Self::F64 => value.to_le_bytes().to_vec(),
            Self::F32 => (value as f32).to_le_bytes().to_vec(),
            Self::I64 => (value as i64).to_le_bytes().to_vec(),
            Self::I32 => (value as i32).to_le_bytes().to_vec(),
        }
    }

    /// Decodes a little-endian slot. `bytes` must be exactly [`size`](Self::size) long.
    pub fn from_le_bytes(self, bytes: &[u8]) -> Option<f64> {
        let value = match self {
            Self::F64 => f64::from_le_bytes(bytes.try_into().ok()?),
            Self::F32 => f64::from(f32::from_le_bytes(bytes.try_into().ok()?)),
            Self::I64 => i64::from_le_bytes(bytes.try_into().ok()?) as f64,
            Self::I32 => f64::from(i32::from_le_bytes(bytes.try_into().ok()?)),
        };
        Some(value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f64" | "double" => Ok(Self::F64),
            "f32" | "float" => Ok(Self::F32),
            "i64" | "long long" => Ok(Self::I64),
            "i32" | "int" => Ok(Self::I32),
            _ => Err(LoadError::UnsupportedValueType(s.to_string())),
        }
    }
}

// Config files go through `FromStr`, so C spellings like `double` are accepted.
impl TryFrom<String> for ValueType {
    type Error = LoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Calling convention of a native export.
///
/// `Stdcall` maps to `extern "system"`: stdcall on 32-bit Windows, the C
/// convention everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CallConv {
    #[default]
    Cdecl,
    Stdcall,
}

impl CallConv {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cdecl => "cdecl",
            Self::Stdcall => "stdcall",
        }
    }
}

impl Display for CallConv {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallConv {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cdecl" | "c" => Ok(Self::Cdecl),
            "stdcall" | "system" | "winapi" => Ok(Self::Stdcall),
            _ => Err(LoadError::UnsupportedCallingConvention(s.to_string())),
        }
    }
}

impl TryFrom<String> for CallConv {
    type Error = LoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
