// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the event with structured fields at its
//! documented level.
//!
//! # Organization
//!
//! * `registry` - Entry point registration and lookup events
//! * `loader` - Native library and WASM module resolution events
//! * `processor` - List traversal lifecycle events

use std::fmt::Display;
use tracing::Span;

pub mod loader;
pub mod processor;
pub mod registry;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the event.
    fn log(&self);

    /// Build a span carrying the same fields. Events that never open a span
    /// keep the default.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
