//! Node references
//!
//! A [`NodeRef`] names one node of one shared document. Identity is the
//! pair (document, arena index), never the node's content.

use std::fmt;
use std::hash::{Hash, Hasher};

use fos_dom::{DocumentId, DomTree, NodeId, SharedDocument};

/// Identity of a node across documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub document: DocumentId,
    pub node: NodeId,
}

/// Handle to a node inside a shared document
#[derive(Clone)]
pub struct NodeRef {
    document: SharedDocument,
    // Cached so identity checks never need to borrow the document
    document_id: DocumentId,
    id: NodeId,
}

impl NodeRef {
    pub fn new(document: &SharedDocument, id: NodeId) -> Self {
        let document_id = document.borrow().id();
        Self {
            document: document.clone(),
            document_id,
            id,
        }
    }

    /// The document node itself
    pub fn document_node(document: &SharedDocument) -> Self {
        let root = document.borrow().root();
        Self::new(document, root)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            document: self.document_id,
            node: self.id,
        }
    }

    /// Whether both nodes live in the same document
    pub fn same_document(&self, other: &NodeRef) -> bool {
        self.document_id == other.document_id
    }

    /// Whether the id still names a node of the document
    pub fn exists(&self) -> bool {
        self.document.borrow().tree().get(self.id).is_some()
    }

    /// Another node of the same document
    pub(crate) fn sibling(&self, id: NodeId) -> NodeRef {
        Self {
            document: self.document.clone(),
            document_id: self.document_id,
            id,
        }
    }

    pub(crate) fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(self.document.borrow().tree())
    }

    pub(crate) fn with_tree_mut<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> R {
        f(self.document.borrow_mut().tree_mut())
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NodeRef {}

impl Hash for NodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("document", &self.document_id)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;

    #[test]
    fn test_identity_is_document_and_index() {
        let doc = Document::new("about:blank").into_shared();
        let body = doc.borrow().body().unwrap();

        let a = NodeRef::new(&doc, body);
        let b = NodeRef::new(&doc, body);
        assert_eq!(a, b);
        assert_ne!(a, NodeRef::document_node(&doc));

        // Same index in another document is a different node
        let other = Document::new("about:blank").into_shared();
        let c = NodeRef::new(&other, body);
        assert_ne!(a, c);
        assert!(!a.same_document(&c));
    }

    #[test]
    fn test_exists() {
        let doc = Document::empty("about:blank").into_shared();
        assert!(NodeRef::document_node(&doc).exists());
        assert!(!NodeRef::new(&doc, NodeId::NONE).exists());
    }
}
