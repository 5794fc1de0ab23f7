//! Selector queries and tree navigation

use fos_css::SelectorQuery;
use fos_dom::NodeId;

use crate::error::QueryResult;
use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;

impl NodeSet {
    /// Descendants of every node matching `selector`.
    ///
    /// Results are gathered node by node, each in document order. A context
    /// node never appears among its own results.
    pub fn find(&self, selector: &str) -> QueryResult<NodeSet> {
        let query = fos_css::compile(selector)?;
        let mut found = Vec::new();
        for node in &self.nodes {
            let context = node.id();
            let ids = node.with_tree(|tree| query.execute(tree, context));
            found.extend(
                ids.into_iter()
                    .filter(|&id| id != context)
                    .map(|id| node.sibling(id)),
            );
        }
        Ok(NodeSet::from_nodes(found))
    }

    /// Nodes that themselves match `selector`
    pub fn filter(&self, selector: &str) -> QueryResult<NodeSet> {
        let query = fos_css::compile(selector)?;
        Ok(self.retain(|node| matches_from_self(&query, node)))
    }

    /// Nodes that do not match `selector` as seen from their parent
    pub fn filter_not(&self, selector: &str) -> QueryResult<NodeSet> {
        let query = fos_css::compile(selector)?;
        Ok(self.retain(|node| !matches_from_parent(&query, node)))
    }

    /// Whether any node matches `selector`
    pub fn is(&self, selector: &str) -> QueryResult<bool> {
        Ok(!self.filter(selector)?.is_empty())
    }

    /// Whether any node fails to match `selector`
    pub fn is_not(&self, selector: &str) -> QueryResult<bool> {
        Ok(!self.filter_not(selector)?.is_empty())
    }

    /// Parents of the nodes that have one
    pub fn parent(&self) -> NodeSet {
        self.nodes
            .iter()
            .filter_map(|node| {
                node.with_tree(|tree| tree.parent(node.id()))
                    .map(|parent| node.sibling(parent))
            })
            .collect()
    }

    /// Direct children of every node, text and comments included
    pub fn children(&self) -> NodeSet {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.with_tree(|tree| tree.child_ids(node.id()))
                    .into_iter()
                    .map(move |child| node.sibling(child))
            })
            .collect()
    }

    /// The document owning the first node; empty when that node is itself
    /// a document or the set is empty
    pub fn document(&self) -> NodeSet {
        let Some(first) = self.first_node() else {
            return NodeSet::new();
        };
        let is_document =
            first.with_tree(|tree| tree.get(first.id()).is_some_and(|node| node.is_document()));
        if is_document {
            NodeSet::new()
        } else {
            NodeSet::from_nodes([NodeRef::document_node(first.document())])
        }
    }

    fn retain(&self, mut keep: impl FnMut(&NodeRef) -> bool) -> NodeSet {
        self.nodes.iter().filter(|node| keep(*node)).cloned().collect()
    }
}

fn matches_from_self(query: &SelectorQuery, node: &NodeRef) -> bool {
    let id = node.id();
    node.with_tree(|tree| query.matches(tree, id, id))
}

fn matches_from_parent(query: &SelectorQuery, node: &NodeRef) -> bool {
    let id = node.id();
    node.with_tree(|tree| {
        // Detached subtrees and the document node are their own context
        let context: NodeId = tree.parent(id).unwrap_or_else(|| tree.top_ancestor(id));
        query.matches(tree, id, context)
    })
}
