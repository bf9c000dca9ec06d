// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::ProcessError;
use crate::list::Node;
use crate::traits::{StatusCode, StopCondition};

/// What the traversal does when an entry point returns a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Halt at the failing node. Later nodes are neither visited nor mutated.
    #[default]
    Stop,
    /// Leave the failing node unmodified and continue with the next one.
    Skip,
}

impl OnError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Skip => "skip",
        }
    }
}

impl Display for OnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnError {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop" => Ok(Self::Stop),
            "skip" => Ok(Self::Skip),
            other => Err(ProcessError::InvalidPolicy {
                policy: other.to_string(),
            }),
        }
    }
}

/// Declarative stop condition for configuration files.
///
/// Halts at the first node for which any configured bound is met. Bounds
/// compare against the output slot, and only when the invocation succeeded.
///
/// ```
/// use the_linkwalker::engine::StopRule;
/// use the_linkwalker::list::Node;
/// use the_linkwalker::traits::StopCondition;
///
/// let rule = StopRule { output_above: Some(5.0), ..StopRule::default() };
/// let node = Node::new(6.0);
/// assert!(rule.should_stop(&node, 0, 3.0, 6.0, 0));
/// assert!(!rule.should_stop(&node, 0, 2.0, 4.0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StopRule {
    pub output_above: Option<f64>,
    pub output_below: Option<f64>,
    /// Halt once this many nodes have been processed.
    pub after_nodes: Option<usize>,
}

impl StopCondition for StopRule {
    fn should_stop(
        &self,
        _node: &Node,
        index: usize,
        _input: f64,
        output: f64,
        status: StatusCode,
    ) -> bool {
        if self.after_nodes.is_some_and(|limit| index >= limit) {
            return true;
        }
        if status != crate::traits::STATUS_OK {
            return false;
        }
        self.output_above.is_some_and(|bound| output > bound)
            || self.output_below.is_some_and(|bound| output < bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_on_error() {
        let test_cases = vec![
            ("stop", Some(OnError::Stop)),
            ("skip", Some(OnError::Skip)),
            ("Skip", None),
            ("retry", None),
            ("", None),
        ];

        for (input, expected) in test_cases {
            match (input.parse::<OnError>(), expected) {
                (Ok(parsed), Some(expected)) => assert_eq!(parsed, expected, "input '{}'", input),
                (Err(ProcessError::InvalidPolicy { policy }), None) => {
                    assert_eq!(policy, input)
                }
                (other, _) => panic!("input '{}': unexpected {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_default_policy_is_stop() {
        assert_eq!(OnError::default(), OnError::Stop);
        assert_eq!(OnError::Skip.to_string(), "skip");
    }

    #[test]
    fn test_stop_rule_bounds() {
        let node = Node::new(0.0);
        let rule = StopRule {
            output_above: Some(5.0),
            output_below: Some(-5.0),
            after_nodes: None,
        };

        assert!(rule.should_stop(&node, 0, 0.0, 5.5, 0));
        assert!(rule.should_stop(&node, 0, 0.0, -5.5, 0));
        assert!(!rule.should_stop(&node, 0, 0.0, 5.0, 0));
        // Failed invocations have no trustworthy output.
        assert!(!rule.should_stop(&node, 0, 0.0, 99.0, 1));
    }

    #[test]
    fn test_stop_rule_after_nodes() {
        let node = Node::new(0.0);
        let rule = StopRule {
            after_nodes: Some(2),
            ..StopRule::default()
        };

        assert!(!rule.should_stop(&node, 0, 0.0, 0.0, 0));
        assert!(!rule.should_stop(&node, 1, 0.0, 0.0, 0));
        assert!(rule.should_stop(&node, 2, 0.0, 0.0, 1));
    }

    #[test]
    fn test_empty_stop_rule_never_stops() {
        let node = Node::new(0.0);
        assert!(!StopRule::default().should_stop(&node, 100, 1.0, 1e9, 0));
    }
}
