//! Tree traversal.
//!
//! Depth-first, pre-order, driven by an explicit stack so deep documents
//! cannot exhaust the call stack. Visiting order depends only on the order of
//! `children` in the input.

use crate::node::Node;
use std::collections::HashSet;

/// Pre-order iterator over a node and all of its descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Node {
    /// Iterate `self` and every descendant in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Collect every node under `root` (inclusive) that matches `predicate`.
pub fn collect<'a, P>(root: &'a Node, predicate: P) -> Vec<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    root.descendants().filter(|n| predicate(n)).collect()
}

/// Like [`collect`] but returns ids, keeping only the first occurrence of each.
pub fn collect_ids<P>(root: &Node, predicate: P) -> Vec<String>
where
    P: Fn(&Node) -> bool,
{
    let mut seen = HashSet::new();
    root.descendants()
        .filter(|n| predicate(n))
        .filter(|n| seen.insert(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect()
}
