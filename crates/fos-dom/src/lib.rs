//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the parser, the selector engine and the
//! query layer. Nodes are addressed by [`NodeId`] and never freed, so an id
//! keeps naming the same node for the lifetime of its document, attached or not.

mod attributes;
mod document;
mod node;
mod operations;
mod tree;

pub use attributes::{Attr, AttributeMap};
pub use document::{Document, DocumentId, SharedDocument};
pub use node::{ElementData, Node, NodeData, TextData};
pub use operations::{DomError, DomResult, NodeOperations};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node of every tree)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
