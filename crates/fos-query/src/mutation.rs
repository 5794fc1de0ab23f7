//! Tree mutation
//!
//! Content is always resolved to a node set first, then deep-copied once
//! per target into the target's document. The content nodes themselves are
//! never moved.

use fos_dom::{NodeId, NodeOperations};

use crate::content::Content;
use crate::error::QueryResult;
use crate::facade_cache::FacadeCache;
use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;

/// Deep copy of `source` owned by the document of `target`, detached
fn import_into(target: &NodeRef, source: &NodeRef) -> QueryResult<NodeId> {
    if target.same_document(source) {
        return Ok(target.with_tree_mut(|tree| tree.clone_node(source.id(), true))?);
    }
    let src = source.document().borrow();
    let mut dst = target.document().borrow_mut();
    Ok(dst.tree_mut().import_node(src.tree(), source.id(), true)?)
}

impl NodeSet {
    /// Detach every node from its parent and empty the set
    pub fn remove(&mut self) -> &mut Self {
        for node in &self.nodes {
            node.with_tree_mut(|tree| tree.detach(node.id()));
        }
        tracing::debug!(count = self.nodes.len(), "removed nodes");
        self.nodes.clear();
        self.facades = FacadeCache::default();
        self
    }

    /// Copy `content` to the end of every node's children
    pub fn append(&self, content: impl Into<Content>) -> QueryResult<&Self> {
        let sources = content.into().into_node_set()?;
        for target in &self.nodes {
            for source in &sources.nodes {
                let copy = import_into(target, source)?;
                target.with_tree_mut(|tree| tree.append_child(target.id(), copy))?;
            }
        }
        tracing::debug!(targets = self.nodes.len(), sources = sources.len(), "appended content");
        Ok(self)
    }

    /// Copy `content` in front of every node's existing children
    pub fn prepend(&self, content: impl Into<Content>) -> QueryResult<&Self> {
        let sources = content.into().into_node_set()?;
        for target in &self.nodes {
            let anchor = target.with_tree(|tree| tree.first_child(target.id()));
            for source in &sources.nodes {
                let copy = import_into(target, source)?;
                target.with_tree_mut(|tree| tree.insert_before(target.id(), copy, anchor))?;
            }
        }
        tracing::debug!(targets = self.nodes.len(), sources = sources.len(), "prepended content");
        Ok(self)
    }

    /// Put a copy of `content` in place of every node.
    ///
    /// The copy of the last content node takes the target's position and
    /// the others are inserted in order before it. Returns the copies, per
    /// target, in content order. With no content the targets are only
    /// detached. Nodes without a parent are left alone.
    pub fn replace(&self, content: impl Into<Content>) -> QueryResult<NodeSet> {
        let sources = content.into().into_node_set()?;
        let mut inserted = Vec::new();

        for target in &self.nodes {
            let id = target.id();
            let Some(parent) = target.with_tree(|tree| tree.parent(id)) else {
                continue;
            };
            let Some((last, earlier)) = sources.nodes.split_last() else {
                target.with_tree_mut(|tree| tree.remove_child(parent, id))?;
                continue;
            };

            let substitute = import_into(target, last)?;
            target.with_tree_mut(|tree| tree.replace_child(parent, substitute, id))?;
            for source in earlier {
                let copy = import_into(target, source)?;
                target.with_tree_mut(|tree| tree.insert_before(parent, copy, Some(substitute)))?;
                inserted.push(target.sibling(copy));
            }
            inserted.push(target.sibling(substitute));
        }

        tracing::debug!(targets = self.nodes.len(), inserted = inserted.len(), "replaced nodes");
        Ok(NodeSet::from_nodes(inserted))
    }

    /// Drop all children of every node, then append `content`
    pub fn replace_inner(&self, content: impl Into<Content>) -> QueryResult<&Self> {
        for target in &self.nodes {
            target.with_tree_mut(|tree| {
                for child in tree.child_ids(target.id()) {
                    tree.detach(child);
                }
            });
        }
        self.append(content)
    }
}
