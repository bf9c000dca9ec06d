// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Singly linked list of numeric node values.
//!
//! The processor only ever mutates `Node::value`; it never relinks or frees
//! nodes. Lists are built from an ordered sequence of values and own their
//! nodes through `head`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Default tag for lists built by [`build`].
pub const DEFAULT_LIST_KIND: &str = "singly";

/// Describes the node layout a list was built with.
///
/// Pass-through metadata: the traversal does not branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListKind(String);

impl ListKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListKind {
    fn default() -> Self {
        Self(DEFAULT_LIST_KIND.to_string())
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of a singly linked list. Each node exclusively owns the next.
#[derive(Debug)]
pub struct Node {
    pub value: f64,
    pub next: Option<Box<Node>>,
}

impl Node {
    pub fn new(value: f64) -> Self {
        Self { value, next: None }
    }

    pub fn next(&self) -> Option<&Node> {
        self.next.as_deref()
    }

    pub fn next_mut(&mut self) -> Option<&mut Node> {
        self.next.as_deref_mut()
    }
}

/// A list head together with the kind tag it was built with.
#[derive(Debug)]
pub struct LinkedList {
    head: Option<Box<Node>>,
    kind: ListKind,
}

impl LinkedList {
    pub fn head(&self) -> Option<&Node> {
        self.head.as_deref()
    }

    pub fn head_mut(&mut self) -> Option<&mut Node> {
        self.head.as_deref_mut()
    }

    pub fn kind(&self) -> &ListKind {
        &self.kind
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Current node values in list order.
    pub fn values(&self) -> Vec<f64> {
        self.iter().map(|node| node.value).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

// Unlink iteratively; the derived recursive drop overflows the stack on long lists.
impl Drop for LinkedList {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node
        })
    }
}

/// Builds a list from values in order. Empty input yields a list with no head.
pub fn build<I>(values: I, kind: ListKind) -> LinkedList
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    let mut head: Option<Box<Node>> = None;
    for value in values.into_iter().rev() {
        head = Some(Box::new(Node { value, next: head }));
    }

    tracing::debug!(kind = kind.as_str(), "Built linked list");

    LinkedList { head, kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let list = build([1.0, 2.0, 3.0], ListKind::default());

        assert_eq!(list.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.head().map(|n| n.value), Some(1.0));
        assert_eq!(list.head().and_then(Node::next).map(|n| n.value), Some(2.0));
    }

    #[test]
    fn test_build_empty_has_no_head() {
        let list = build(Vec::new(), ListKind::default());

        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_kind_is_carried_through() {
        let list = build([1.0], ListKind::new("double_node"));
        assert_eq!(list.kind().as_str(), "double_node");
        assert_eq!(ListKind::default().to_string(), "singly");
    }

    #[test]
    fn test_head_mut_allows_in_place_mutation() {
        let mut list = build([1.0, 2.0], ListKind::default());

        if let Some(second) = list.head_mut().and_then(Node::next_mut) {
            second.value = 20.0;
        }

        assert_eq!(list.values(), vec![1.0, 20.0]);
    }

    #[test]
    fn test_long_list_drops_without_overflow() {
        let list = build((0..200_000).map(f64::from), ListKind::default());
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
