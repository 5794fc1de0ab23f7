//! DOM Tree (arena-based allocation)
//!
//! Slot 0 always holds the document node. Removing a node only unlinks it;
//! the slot stays occupied so outstanding [`NodeId`]s never get reused.

use crate::{DomError, DomResult, Node, NodeData, NodeId, NodeOperations};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Number of nodes ever allocated in the tree (detached ones included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but its document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add a detached node to the arena
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::unlinked(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.push(Node::unlinked(NodeData::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        }))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.option()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.option()
    }

    /// Iterate direct children in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Iterate all descendants of `id` (excluding `id`) in pre-order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Inclusive ancestor check: true when `node` is `ancestor` or lies below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Outermost ancestor of a node: the document for attached nodes, the
    /// root of the detached subtree otherwise
    pub fn top_ancestor(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::node_name)
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.name.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let element = node
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType("set_attribute"))?;
        element.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute; `Ok(false)` when it was not set
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let element = node
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType("remove_attribute"))?;
        Ok(element.remove_attr(name))
    }

    /// First element with the given tag name below the document node
    pub fn first_element_by_tag_name(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|(_, node)| {
                node.as_element()
                    .is_some_and(|e| e.name.eq_ignore_ascii_case(tag))
            })
            .map(|(id, _)| id)
    }

    /// Unlink a node from its parent, if it has one
    pub fn detach(&mut self, id: NodeId) {
        if self.get(id).is_some() {
            self.unlink(id);
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Link a detached node under `parent`, before `reference` (NONE = at the end)
    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let prev = if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if self.node(child)?.is_document() {
            return Err(DomError::HierarchyRequest("a document cannot be inserted"));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest("node is an ancestor of the parent"));
        }
        Ok(())
    }

    fn clone_within(&mut self, id: NodeId, deep: bool) -> NodeId {
        let copy = self.nodes[id.index()].detached_copy();
        let new_id = self.push(copy);
        if !deep {
            return new_id;
        }
        // (original, copy) pairs whose children still need copying
        let mut pending = vec![(id, new_id)];
        while let Some((original, parent_copy)) = pending.pop() {
            for child in self.child_ids(original) {
                let copy = self.nodes[child.index()].detached_copy();
                let child_copy = self.push(copy);
                self.link_before(parent_copy, child_copy, NodeId::NONE);
                pending.push((child, child_copy));
            }
        }
        new_id
    }

    fn copy_from(&mut self, source: &DomTree, id: NodeId, deep: bool) -> NodeId {
        let new_id = self.push(source.nodes[id.index()].detached_copy());
        if !deep {
            return new_id;
        }
        let mut pending = vec![(id, new_id)];
        while let Some((original, parent_copy)) = pending.pop() {
            for (child, node) in source.children(original) {
                let child_copy = self.push(node.detached_copy());
                self.link_before(parent_copy, child_copy, NodeId::NONE);
                pending.push((child, child_copy));
            }
        }
        new_id
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(child);
        Ok(child)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insertable(parent, new_child)?;
        if let Some(reference) = ref_child {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == new_child {
                return Ok(new_child);
            }
        }

        self.unlink(new_child);
        self.link_before(parent, new_child, ref_child.unwrap_or(NodeId::NONE));
        Ok(new_child)
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: old_child,
            });
        }
        if new_child == old_child {
            return Ok(old_child);
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.unlink(old_child);
        Ok(old_child)
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId> {
        if self.node(node)?.is_document() {
            return Err(DomError::InvalidNodeType("clone_node"));
        }
        Ok(self.clone_within(node, deep))
    }

    fn import_node(&mut self, source: &DomTree, node: NodeId, deep: bool) -> DomResult<NodeId> {
        if source.node(node)?.is_document() {
            return Err(DomError::InvalidNodeType("import_node"));
        }
        tracing::trace!(%node, deep, "importing node from foreign tree");
        Ok(self.copy_from(source, node, deep))
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut current = id;
            loop {
                if current == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                current = n.parent;
                if !current.is_valid() {
                    break NodeId::NONE;
                }
            }
        };

        Some((id, node))
    }
}
