// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for list traversal events.
//!
//! This module contains message types for logging events related to:
//! * Traversal lifecycle (start, early halt, completion)
//! * Per-node entry point failures
//! * Processor disposal

use crate::observability::messages::StructuredLog;
use crate::traits::StatusCode;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Traversal of a non-empty list started.
///
/// # Log Level
/// `debug!` - Opens the `traversal` span
///
/// # Example
/// ```
/// use the_linkwalker::observability::messages::processor::TraversalStarted;
///
/// let msg = TraversalStarted {
///     entry_point: "double",
///     list_kind: "singly",
///     on_error: "stop",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Traversal started: entry_point='double', list_kind=singly, on_error=stop"
/// );
/// ```
pub struct TraversalStarted<'a> {
    pub entry_point: &'a str,
    pub list_kind: &'a str,
    pub on_error: &'a str,
}

impl Display for TraversalStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Traversal started: entry_point='{}', list_kind={}, on_error={}",
            self.entry_point, self.list_kind, self.on_error
        )
    }
}

impl StructuredLog for TraversalStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            entry_point = self.entry_point,
            list_kind = self.list_kind,
            on_error = self.on_error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "traversal",
            span_name = name,
            entry_point = self.entry_point,
            list_kind = self.list_kind,
            on_error = self.on_error,
        )
    }
}

/// Entry point returned a non-zero status for a node.
///
/// # Log Level
/// `warn!` - Recoverable per the `on_error` policy
pub struct NodeFailed<'a> {
    pub entry_point: &'a str,
    pub index: usize,
    pub input: f64,
    pub status: StatusCode,
}

impl Display for NodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Entry point '{}' failed on node {} (input={}): status={}",
            self.entry_point, self.index, self.input, self.status
        )
    }
}

impl StructuredLog for NodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            entry_point = self.entry_point,
            index = self.index,
            input = self.input,
            status = self.status,
            "{}", self
        );
    }
}

/// Traversal halted before the end of the list.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TraversalHalted<'a> {
    pub entry_point: &'a str,
    pub index: usize,
    pub reason: &'a str,
}

impl Display for TraversalHalted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Traversal with '{}' halted at node {}: {}",
            self.entry_point, self.index, self.reason
        )
    }
}

impl StructuredLog for TraversalHalted<'_> {
    fn log(&self) {
        tracing::info!(
            entry_point = self.entry_point,
            index = self.index,
            reason = self.reason,
            "{}", self
        );
    }
}

/// Traversal finished, normally or after a halt.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_linkwalker::observability::messages::processor::TraversalCompleted;
/// use std::time::Duration;
///
/// let msg = TraversalCompleted {
///     entry_point: "double",
///     success: 3,
///     fail: 0,
///     duration: Duration::from_micros(12),
/// };
///
/// assert!(msg.to_string().contains("success=3, fail=0"));
/// ```
pub struct TraversalCompleted<'a> {
    pub entry_point: &'a str,
    pub success: usize,
    pub fail: usize,
    pub duration: std::time::Duration,
}

impl Display for TraversalCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Traversal with '{}' completed: success={}, fail={}, duration={:?}",
            self.entry_point, self.success, self.fail, self.duration
        )
    }
}

impl StructuredLog for TraversalCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            entry_point = self.entry_point,
            success = self.success,
            fail = self.fail,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }
}

/// Processor released its entry point.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct ProcessorDisposed<'a> {
    pub entry_point: &'a str,
}

impl Display for ProcessorDisposed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processor bound to '{}' disposed", self.entry_point)
    }
}

impl StructuredLog for ProcessorDisposed<'_> {
    fn log(&self) {
        tracing::debug!(entry_point = self.entry_point, "{}", self);
    }
}
