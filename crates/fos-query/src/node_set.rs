//! Node sets
//!
//! A [`NodeSet`] is the value every chain operation consumes and produces.
//! It never holds the same node twice: duplicates are dropped at
//! construction, first occurrence wins. Order is discovery order, which is
//! not necessarily document order.

use std::collections::HashSet;
use std::fmt;

use crate::facade_cache::FacadeCache;
use crate::node_ref::NodeRef;

/// Ordered, identity-deduplicated view over tree nodes
#[derive(Debug, Default)]
pub struct NodeSet {
    pub(crate) nodes: Vec<NodeRef>,
    pub(crate) facades: FacadeCache,
}

impl NodeSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from candidates, dropping repeated identities
    pub fn from_nodes(candidates: impl IntoIterator<Item = NodeRef>) -> Self {
        let mut seen = HashSet::new();
        let nodes = candidates
            .into_iter()
            .filter(|node| seen.insert(node.key()))
            .collect();
        Self {
            nodes,
            facades: FacadeCache::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The raw node references
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub(crate) fn first_node(&self) -> Option<&NodeRef> {
        self.nodes.first()
    }

    /// Array-slice semantics: a negative `offset` counts from the end, a
    /// negative `length` stops that many nodes before the end and `None`
    /// runs to the end.
    pub fn slice(&self, offset: isize, length: Option<isize>) -> NodeSet {
        let len = self.nodes.len() as isize;
        let start = if offset < 0 {
            (len + offset).max(0)
        } else {
            offset.min(len)
        };
        let end = match length {
            None => len,
            Some(length) if length < 0 => (len + length).max(start),
            Some(length) => (start + length).min(len),
        };
        NodeSet::from_nodes(self.nodes[start as usize..end as usize].iter().cloned())
    }

    /// The node at `index` (negative counts from the end), or an empty set
    pub fn at(&self, index: isize) -> NodeSet {
        self.slice(index, Some(1))
    }

    pub fn first(&self) -> NodeSet {
        self.slice(0, Some(1))
    }

    pub fn last(&self) -> NodeSet {
        self.slice(-1, Some(1))
    }

    /// Call `callback` once per node, each wrapped as a singleton set
    pub fn each(&self, mut callback: impl FnMut(NodeSet)) -> &Self {
        for single in self.iter() {
            callback(single);
        }
        self
    }

    /// Singleton sets, one per contained node
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    /// Concatenated outer markup of every node
    pub fn to_text(&self) -> String {
        self.iter().map(|single| single.html()).collect()
    }
}

impl Clone for NodeSet {
    /// Same nodes, fresh facade cache
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            facades: FacadeCache::default(),
        }
    }
}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromIterator<NodeRef> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = NodeSet;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator yielding singleton node sets
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, NodeRef>,
}

impl Iterator for Iter<'_> {
    type Item = NodeSet;

    fn next(&mut self) -> Option<NodeSet> {
        self.inner
            .next()
            .map(|node| NodeSet::from_nodes([node.clone()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<NodeSet> {
        self.inner
            .next_back()
            .map(|node| NodeSet::from_nodes([node.clone()]))
    }
}
