// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout The Linkwalker. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep log wording in one place per subsystem
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - Entry point registration and lookup events
//! * `messages::loader` - Native library and WASM module resolution events
//! * `messages::processor` - List traversal lifecycle events
//!
//! # Usage
//!
//! ```rust
//! use the_linkwalker::observability::messages::{processor::NodeFailed, StructuredLog};
//!
//! NodeFailed {
//!     entry_point: "double_non_negative",
//!     index: 1,
//!     input: -2.0,
//!     status: 1,
//! }
//! .log();
//! ```

pub mod messages;
