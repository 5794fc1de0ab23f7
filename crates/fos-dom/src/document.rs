//! Document - High-level document API

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{DomTree, NodeId, NodeOperations};

/// Shared, single-threaded handle to a document.
///
/// Node sets keep documents alive through this handle; mutations through one
/// handle are visible through every other handle on the same document.
pub type SharedDocument = Rc<RefCell<Document>>;

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    id: DocumentId,
    /// Document URL
    url: String,
    /// Charset label the markup declared (or was loaded with)
    charset: String,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);
        let tree = &mut document.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        for (parent, child) in [(root, html), (html, head), (html, body)] {
            if let Err(err) = tree.append_child(parent, child) {
                tracing::trace!(%parent, %child, "skeleton node left detached: {}", err);
            }
        }

        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            id: DocumentId::next(),
            url: url.to_string(),
            charset: "UTF-8".to_string(),
        }
    }

    /// Wrap this document into a shared handle
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn set_charset(&mut self, charset: &str) {
        self.charset = charset.to_string();
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.first_element_by_tag_name("html")
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.tree.first_element_by_tag_name("head")
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.tree.first_element_by_tag_name("body")
    }

    /// Get document title
    pub fn title(&self) -> String {
        let Some(title) = self.tree.first_element_by_tag_name("title") else {
            return String::new();
        };
        self.tree
            .children(title)
            .filter_map(|(_, child)| child.as_text())
            .collect()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
