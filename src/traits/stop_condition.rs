// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::list::Node;
use crate::traits::StatusCode;

/// Caller-supplied predicate for early traversal termination.
///
/// Evaluated for every invocation that does not halt on failure. `node` still
/// holds the original value and `output` is the value that would be written.
/// Returning `true` leaves the node as it is and ends traversal; a failure has
/// already been counted by then.
///
/// Any closure of the shape `Fn(&Node, usize, f64, f64, StatusCode) -> bool`
/// implements it.
pub trait StopCondition {
    fn should_stop(
        &self,
        node: &Node,
        index: usize,
        input: f64,
        output: f64,
        status: StatusCode,
    ) -> bool;
}

impl<F> StopCondition for F
where
    F: Fn(&Node, usize, f64, f64, StatusCode) -> bool,
{
    fn should_stop(
        &self,
        node: &Node,
        index: usize,
        input: f64,
        output: f64,
        status: StatusCode,
    ) -> bool {
        self(node, index, input, output, status)
    }
}
