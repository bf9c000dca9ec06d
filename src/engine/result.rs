// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::traits::StatusCode;

/// Summary of one `process` call.
///
/// `success` and `fail` count exactly the nodes that were visited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessResult {
    pub success: usize,
    pub fail: usize,
    /// One record per failed node, in visit order.
    pub failures: Vec<NodeFailure>,
    /// Why traversal ended before the end of the list, if it did.
    pub halt: Option<Halt>,
}

impl ProcessResult {
    /// Number of nodes the entry point was invoked on.
    pub fn visited(&self) -> usize {
        self.success + self.fail
    }

    pub fn halted_early(&self) -> bool {
        self.halt.is_some()
    }
}

/// A node whose entry point invocation returned a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeFailure {
    pub index: usize,
    pub input: f64,
    /// Output slot contents after the failed call. Not a valid result.
    pub output: f64,
    pub status: StatusCode,
}

/// Reason traversal stopped before reaching the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Halt {
    /// A node failed under the `stop` policy.
    OnFailure { index: usize },
    /// The stop condition returned true for this node.
    StopCondition { index: usize },
}

impl Halt {
    pub fn index(self) -> usize {
        match self {
            Self::OnFailure { index } | Self::StopCondition { index } => index,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::OnFailure { .. } => "entry point failed under 'stop' policy",
            Self::StopCondition { .. } => "stop condition met",
        }
    }
}
